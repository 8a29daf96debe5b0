/// Errors raised while wiring the global tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The log directory or file appender could not be prepared.
    #[error("log file setup failed: {message}")]
    File { message: String },

    /// A global subscriber is already installed.
    #[error("logger initialization failed: {message}")]
    Init { message: String },

    /// The provided filter directive string is malformed.
    #[error("invalid filter directive: {message}")]
    Filter { message: String },
}
