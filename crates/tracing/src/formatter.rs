use crate::layers::BoxedLayer;
use clap::ValueEnum;
use std::fmt::{self, Display};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter, Layer, Registry};

/// Represents the logging format.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[value(name = "json")]
    Json,

    /// `key=value` pairs, one event per line.
    #[value(name = "log-fmt")]
    LogFmt,

    /// Human readable output.
    #[value(name = "terminal")]
    Terminal,
}

impl LogFormat {
    /// Builds a boxed layer rendering events in this format.
    ///
    /// * `filter` - the filter applied to this layer only
    /// * `color` - the color mode; `None` disables ANSI escapes
    /// * `file_writer` - writes to the file layer when present, otherwise to stderr
    pub(crate) fn apply(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        file_writer: Option<NonBlocking>,
    ) -> BoxedLayer<Registry> {
        let ansi = match color {
            Some(color) => {
                std::env::var("RUST_LOG_STYLE").map(|val| val != "never").unwrap_or(color != "never")
            }
            None => false,
        };
        let target = std::env::var("RUST_LOG_TARGET").map(|val| val != "0").unwrap_or(true);

        // stdout is reserved for command output
        let writer = match file_writer {
            Some(writer) => BoxMakeWriter::new(writer),
            None => BoxMakeWriter::new(std::io::stderr),
        };

        match self {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(ansi)
                .with_target(target)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
            LogFormat::LogFmt => {
                tracing_logfmt::builder().layer().with_writer(writer).with_filter(filter).boxed()
            }
            LogFormat::Terminal => tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_target(target)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::LogFmt => write!(f, "log-fmt"),
            LogFormat::Terminal => write!(f, "terminal"),
        }
    }
}
