//! clap [Args](clap::Args) for logging configuration.

use clap::{ArgAction, Args, ValueEnum};
use regvm_tracing::{
    tracing_subscriber::filter::Directive, FileInfo, FileWorkerGuard, LayerInfo, LogFormat,
    RegvmTracer, Tracer,
};
use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};
use tracing::{level_filters::LevelFilter, Level};

/// The log configuration.
#[derive(Debug, Args)]
#[clap(next_help_heading = "LOGGING")]
pub(crate) struct LogArgs {
    /// The format to use for logs written to stderr.
    #[clap(long = "log.stderr.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    pub(crate) log_stderr_format: LogFormat,

    /// The filter to use for logs written to stderr.
    #[clap(long = "log.stderr.filter", value_name = "FILTER", global = true, default_value = "")]
    pub(crate) log_stderr_filter: String,

    /// The directory to write a log file to. No log file is written when unset.
    #[clap(long = "log.file.directory", value_name = "PATH", global = true)]
    pub(crate) log_file_directory: Option<PathBuf>,

    /// The format to use for logs written to the log file.
    #[clap(long = "log.file.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    pub(crate) log_file_format: LogFormat,

    /// The filter to use for logs written to the log file.
    #[clap(long = "log.file.filter", value_name = "FILTER", global = true, default_value = "debug")]
    pub(crate) log_file_filter: String,

    /// Sets whether or not the formatter emits ANSI terminal escape codes for colors and other
    /// text formatting.
    #[clap(
        long,
        value_name = "COLOR",
        global = true,
        default_value_t = ColorMode::Always
    )]
    pub(crate) color: ColorMode,

    /// The verbosity settings for the tracer.
    #[clap(flatten)]
    pub(crate) verbosity: Verbosity,
}

impl LogArgs {
    /// Creates a [LayerInfo] instance.
    fn layer(&self, format: LogFormat, filter: String, use_color: bool) -> LayerInfo {
        LayerInfo::new(
            format,
            self.verbosity.directive().to_string(),
            filter,
            if use_color { Some(self.color.to_string()) } else { None },
        )
    }

    /// Initializes tracing with the configured options from cli args.
    pub(crate) fn init_tracing(&self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut tracer = RegvmTracer::new();

        let stderr = self.layer(self.log_stderr_format, self.log_stderr_filter.clone(), true);
        tracer = tracer.with_stderr(stderr);

        if let Some(directory) = &self.log_file_directory {
            let file = self.layer(self.log_file_format, self.log_file_filter.clone(), false);
            tracer =
                tracer.with_file(file, FileInfo::new(directory.clone(), "regvm.log".to_string()));
        }

        let guard = tracer.init()?;
        Ok(guard)
    }
}

/// The color mode for the cli.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub(crate) enum ColorMode {
    /// Colors on
    Always,
    /// Colors on when writing to a terminal
    Auto,
    /// Colors off
    Never,
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Always => write!(f, "always"),
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(ColorMode::Always),
            "auto" => Ok(ColorMode::Auto),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!("Invalid color mode: {}", s)),
        }
    }
}

/// The verbosity settings for the cli.
#[derive(Debug, Copy, Clone, Args)]
#[clap(next_help_heading = "DISPLAY")]
pub(crate) struct Verbosity {
    /// Set the minimum log level.
    ///
    /// -v     Warnings & Errors
    /// -vv    Info
    /// -vvv   Debug
    /// -vvvv  Traces (warning: very verbose!)
    #[clap(short, long, action = ArgAction::Count, global = true, default_value_t = 1, verbatim_doc_comment, help_heading = "DISPLAY")]
    verbosity: u8,

    /// Silence all log output.
    #[clap(long, alias = "silent", short = 'q', global = true, help_heading = "DISPLAY")]
    quiet: bool,
}

impl Verbosity {
    /// Get the corresponding [Directive] for the given verbosity, or none if the verbosity
    /// corresponds to silent.
    pub(crate) fn directive(&self) -> Directive {
        if self.quiet {
            LevelFilter::OFF.into()
        } else {
            let level = match self.verbosity.saturating_sub(1) {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            };

            level.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        logs: LogArgs,
    }

    fn directive(args: &[&str]) -> String {
        let args = TestArgs::try_parse_from(std::iter::once("regvm").chain(args.iter().copied()))
            .expect("failed to parse args");
        args.logs.verbosity.directive().to_string()
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(directive(&[]), "warn");
        assert_eq!(directive(&["-v"]), "warn");
        assert_eq!(directive(&["-vv"]), "info");
        assert_eq!(directive(&["-vvv"]), "debug");
        assert_eq!(directive(&["-vvvv"]), "trace");
        assert_eq!(directive(&["-vvvv", "-q"]), "off");
    }

    #[test]
    fn test_log_defaults() {
        let args = TestArgs::try_parse_from(["regvm"]).expect("failed to parse args");

        assert_eq!(args.logs.log_stderr_format, LogFormat::Terminal);
        assert_eq!(args.logs.color, ColorMode::Always);
        assert!(args.logs.log_file_directory.is_none());
    }

    #[test]
    fn test_log_file_args() {
        let args = TestArgs::try_parse_from([
            "regvm",
            "--log.file.directory",
            "/tmp/regvm-logs",
            "--log.file.format",
            "json",
            "--log.stderr.format",
            "log-fmt",
        ])
        .expect("failed to parse args");

        assert_eq!(args.logs.log_file_directory, Some(PathBuf::from("/tmp/regvm-logs")));
        assert_eq!(args.logs.log_file_format, LogFormat::Json);
        assert_eq!(args.logs.log_stderr_format, LogFormat::LogFmt);
    }

    #[test]
    fn test_color_mode_round_trip() {
        for mode in [ColorMode::Always, ColorMode::Auto, ColorMode::Never] {
            assert_eq!(mode.to_string().parse::<ColorMode>(), Ok(mode));
        }
        assert!("sometimes".parse::<ColorMode>().is_err());
    }
}
