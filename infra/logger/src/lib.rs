//! # Logger
//!
//! A centralized logging utility for the workspace. Configures console and
//! rolling-file output with non-blocking I/O and environment-based filtering.
//!
//! `RUST_LOG` wins over everything; otherwise the builder's directives apply.
//! Keep the returned [`LoggerGuard`] alive for the lifetime of the process so
//! buffered file output is flushed on shutdown.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rhub_logger::{LevelFilter, Logger};
//!
//! let _guard = Logger::builder()
//!     .name("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Entry point; see [`Logger::builder`].
#[derive(Debug)]
pub struct Logger;

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }
}

/// Keeps the non-blocking file writer alive. Dropping it flushes and stops
/// the background writer thread.
#[derive(Debug)]
pub struct LoggerGuard {
    _file: Option<WorkerGuard>,
}

/// A builder for configuring and installing the global tracing subscriber.
#[must_use = "the builder does nothing unless you call .init()"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    directory: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
    env_filter: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            console: true,
            level: LevelFilter::INFO,
            directory: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            env_filter: None,
        }
    }
}

impl LoggerBuilder {
    /// Sets the application name used as the log file prefix.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables or disables console output.
    pub const fn console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Sets the default level when no filter directives apply.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enables rolling-file output into the given directory.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Configures the log file rotation strategy.
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Configures how many rotated log files to keep.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Sets module-directed filter directives (e.g. `"rhub=debug,hyper=info"`),
    /// applied when `RUST_LOG` is unset.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Filter`] for malformed directives,
    /// [`LoggerError::File`] when the file appender cannot be created, and
    /// [`LoggerError::Init`] when a global subscriber is already installed.
    pub fn init(self) -> Result<LoggerGuard, LoggerError> {
        let filter = self.build_filter()?;

        let console_layer = self.console.then(|| layer().with_target(true));

        let (file_layer, file_guard) = match &self.directory {
            Some(directory) => {
                let appender = RollingFileAppender::builder()
                    .rotation(self.rotation.clone())
                    .filename_prefix(self.name.clone())
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.max_files)
                    .build(directory)
                    .map_err(|e| LoggerError::File { message: e.to_string() })?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                (Some(file_layer), Some(guard))
            },
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| LoggerError::Init { message: e.to_string() })?;

        Ok(LoggerGuard { _file: file_guard })
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
            return EnvFilter::try_from_default_env()
                .map_err(|e| LoggerError::Filter { message: e.to_string() });
        }
        if let Some(directives) = &self.env_filter {
            return EnvFilter::try_new(directives)
                .map_err(|e| LoggerError::Filter { message: e.to_string() });
        }
        Ok(EnvFilter::new(self.level.to_string()))
    }
}
