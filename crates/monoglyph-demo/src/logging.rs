use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// Environment variable consulted when `--log-filter` is absent.
pub const LOG_ENV: &str = "MONOGLYPH_LOG";

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Tracing filter directives, e.g. `info` or `monoglyph_widgets=debug`.
    #[arg(long = "log-filter", global = true)]
    pub filter: Option<String>,

    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub format: LogFormat,

    /// Append logs to this file instead of stderr.
    #[arg(long = "log-file", global = true)]
    pub file: Option<PathBuf>,
}

/// Build the filter: `--log-filter`, then `MONOGLYPH_LOG`, then `warn`.
pub fn filter_for(args: &LogArgs) -> Result<EnvFilter> {
    match &args.filter {
        Some(directives) => EnvFilter::try_new(directives).map_err(|error| DemoError::Logging {
            message: format!("bad filter `{directives}`: {error}"),
        }),
        None => Ok(EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global tracing subscriber.
pub fn init(args: &LogArgs) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(args)?)
        .with_target(false);

    let installed = match (&args.file, args.format) {
        (Some(path), format) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let writer = Mutex::new(file);
            match format {
                LogFormat::Text => builder.with_ansi(false).with_writer(writer).try_init(),
                LogFormat::Json => builder.json().with_writer(writer).try_init(),
            }
        }
        (None, LogFormat::Text) => builder.with_writer(std::io::stderr).try_init(),
        (None, LogFormat::Json) => builder.json().with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|error| DemoError::Logging {
        message: error.to_string(),
    })
}
