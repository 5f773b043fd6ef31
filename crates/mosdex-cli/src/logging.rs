//! Stderr logging for the converters.

use std::env;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Filter directive used when `MOSDEX_TRACE` is unset.
pub const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidFilter { reason: String },
    InvalidFormat { format: String },
    LogFile { path: String, reason: String },
    Init { reason: String },
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter { .. } => "LOG_FILTER_INVALID",
            LoggingError::InvalidFormat { .. } => "LOG_FORMAT_INVALID",
            LoggingError::LogFile { .. } => "LOG_FILE_OPEN",
            LoggingError::Init { .. } => "LOG_INIT",
        }
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter { reason } => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), reason)
            }
            LoggingError::InvalidFormat { format } => write!(
                f,
                "[{}] Invalid MOSDEX_LOG_FORMAT '{}' (expected 'json' or 'pretty')",
                self.code(),
                format
            ),
            LoggingError::LogFile { path, reason } => write!(
                f,
                "[{}] Failed to open log file '{}': {}",
                self.code(),
                path,
                reason
            ),
            LoggingError::Init { reason } => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::LogFile {
            path: path.to_string(),
            reason: err.to_string(),
        })
}

fn map_init_err<E: fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init {
        reason: err.to_string(),
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter {
            reason: err.to_string(),
        })
    }
}

/// Whether `format` selects JSON output. Only `json` and `pretty` are accepted.
fn use_json(format: &str) -> Result<bool, LoggingError> {
    if format.eq_ignore_ascii_case("json") {
        Ok(true)
    } else if format.eq_ignore_ascii_case("pretty") {
        Ok(false)
    } else {
        Err(LoggingError::InvalidFormat {
            format: format.to_string(),
        })
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// One formatting layer writing JSON or pretty events to `writer`.
fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    if json {
        layer.json().boxed()
    } else {
        layer.pretty().boxed()
    }
}

/// Install the global subscriber.
///
/// Reads `MOSDEX_TRACE` (default `warn`), `MOSDEX_LOG_FORMAT` and
/// `MOSDEX_LOG_FILE`. Events go to stderr, and also to the log file when one
/// is set. Returns false if a subscriber is already configured.
pub fn init() -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = env::var("MOSDEX_TRACE").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    let filter = build_filter(&level)?;
    let format = env::var("MOSDEX_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let json = use_json(&format)?;

    let mut layers = vec![fmt_layer(io::stderr, json, true)];
    if let Ok(path) = env::var("MOSDEX_LOG_FILE") {
        layers.push(fmt_layer(open_log_file(&path)?, json, false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(map_init_err)?;
    Ok(true)
}
