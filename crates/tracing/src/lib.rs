//! The `regvm-tracing` crate builds the global `tracing` subscriber used by the regvm binary.
//!
//! A [`RegvmTracer`] is configured with a stderr layer and, optionally, a file layer. Each layer
//! has its own [`LogFormat`] and filter directives.

// re-export tracing crates.
pub use tracing;
pub use tracing_subscriber;

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};

use layers::Layers;
use tracing::level_filters::LevelFilter;

/// Tracer for application logging. Implementations install a global subscriber.
pub trait Tracer {
    /// Installs the subscriber. The returned guard, if any, must be held for as long as the file
    /// layer should keep flushing.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// Configuration of a single logging layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [`LayerInfo`].
    ///
    /// * `format` - how events are rendered
    /// * `default_directive` - the level used when `RUST_LOG` is unset, e.g. `"warn"`
    /// * `filters` - additional comma separated directives, e.g. `"regvm_vm=trace"`
    /// * `color` - `always`, `auto` or `never`; `None` disables ANSI escapes
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// The default [`Tracer`] for regvm: a stderr layer plus an optional file layer.
#[derive(Debug, Clone, Default)]
pub struct RegvmTracer {
    stderr: LayerInfo,
    file: Option<(LayerInfo, FileInfo)>,
}

impl RegvmTracer {
    /// Creates a tracer that logs to stderr at `info` level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stderr layer configuration.
    pub fn with_stderr(mut self, config: LayerInfo) -> Self {
        self.stderr = config;
        self
    }

    /// Adds a layer writing to the given file.
    pub fn with_file(mut self, config: LayerInfo, file: FileInfo) -> Self {
        self.file = Some((config, file));
        self
    }
}

impl Tracer for RegvmTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stderr(
            self.stderr.format,
            self.stderr.default_directive.parse()?,
            &self.stderr.filters,
            self.stderr.color,
        )?;

        let file_guard = match self.file {
            Some((config, file)) => Some(layers.file(
                config.format,
                config.default_directive.parse()?,
                &config.filters,
                file,
            )?),
            None => None,
        };

        layers.init()?;
        Ok(file_guard)
    }
}
