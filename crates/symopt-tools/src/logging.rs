//! Structured logging setup.

use std::fs::{File, OpenOptions};
use std::io;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the fmt layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }

    /// Case-insensitive `pretty` / `json`.
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }
}

/// Error type for logging setup.
#[derive(Debug, Clone, PartialEq)]
pub enum LoggingError {
    /// Filter directive could not be parsed.
    InvalidFilter(String),
    /// Format other than `pretty` or `json`.
    InvalidFormat(String),
    /// Log file could not be opened.
    LogFile { path: String, message: String },
    /// Subscriber installation failed.
    Init(String),
}

impl LoggingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOGGING_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOGGING_INVALID_FORMAT",
            LoggingError::LogFile { .. } => "LOGGING_FILE_UNAVAILABLE",
            LoggingError::Init(_) => "LOGGING_INIT_FAILED",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), msg)
            }
            LoggingError::InvalidFormat(value) => write!(
                f,
                "[{}] Invalid SYMOPT_LOG_FORMAT '{}' (expected 'json' or 'pretty')",
                self.code(),
                value
            ),
            LoggingError::LogFile { path, message } => write!(
                f,
                "[{}] Failed to open log file {}: {}",
                self.code(),
                path,
                message
            ),
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

/// Logging options. Unset fields fall back to `off`, pretty output and no
/// log file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive such as `debug` or `symopt_expr=trace`.
    pub level: Option<String>,
    pub format: Option<LogFormat>,
    /// File that receives a copy of every event, without ANSI colors.
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `SYMOPT_TRACE`, `SYMOPT_LOG_FORMAT` and `SYMOPT_LOG_FILE`.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggingConfig::from_env`] with an injected variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = lookup("SYMOPT_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .transpose()?;
        Ok(Self {
            level: lookup("SYMOPT_TRACE"),
            format,
            file: lookup("SYMOPT_LOG_FILE"),
        })
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.format.is_none() && self.file.is_none()
    }

    /// Filter built from `level`; `off` (the default) disables every event.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        let level = self.level.as_deref().unwrap_or("off");
        EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::LogFile {
            path: path.to_string(),
            message: err.to_string(),
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Install a global subscriber: an `EnvFilter`, a stderr layer and an
/// optional file layer, all in the configured format.
///
/// Returns `Ok(false)` without touching anything when a global subscriber is
/// already set.
pub fn enable_logging(config: &LoggingConfig) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = config.filter()?;
    let log_file = config.file.as_deref().map(open_log_file).transpose()?;

    match config.format.unwrap_or_default() {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(file) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(file) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    tracing::debug!(
        component = "logging",
        operation = "enable",
        status = "success",
        format = config.format.unwrap_or_default().as_str(),
        file = config.file.as_deref().unwrap_or("-"),
        "Logging enabled"
    );
    Ok(true)
}
