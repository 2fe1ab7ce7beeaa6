//! Error types for the logging facade

use std::error::Error as StdError;
use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Boxed error carried as the source of a backend failure
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Logger name rejected by validation
    #[error("Invalid logger name '{name}': {reason}")]
    InvalidLoggerName { name: String, reason: String },

    /// Unrecognised level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// An optional backend is not present in this process
    #[error("Backend '{backend}' is not available: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    /// A present backend failed while handling a call
    #[error("Backend '{backend}' failed: {message}")]
    BackendFailure {
        backend: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid logger name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::InvalidLoggerName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a backend unavailable error
    pub fn unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::BackendUnavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    /// Create a backend failure error without an underlying cause
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::BackendFailure {
            backend: backend.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend failure error wrapping the error reported by the backend
    pub fn backend_source(
        backend: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        LoggerError::BackendFailure {
            backend: backend.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by misuse of the API or bad configuration values
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidConfiguration { .. }
                | LoggerError::InvalidLoggerName { .. }
                | LoggerError::InvalidLevel(_)
        )
    }

    /// True for runtime failures reported by a bound backend
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, LoggerError::BackendFailure { .. })
    }
}

/// Displays an error followed by each of its sources, one per line, each source
/// prefixed with `Caused by: `.
pub struct CauseChain<'a>(pub &'a (dyn StdError + 'static));

impl fmt::Display for CauseChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, "\nCaused by: {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

/// Render an error and its sources as text
pub fn cause_chain(cause: &(dyn StdError + 'static)) -> String {
    CauseChain(cause).to_string()
}
