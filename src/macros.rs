//! Logging macros for ergonomic log message formatting.
//!
//! The level macros take a logger and `format!`-style arguments. The arguments
//! are only formatted when the level passes the logger's gate.
//!
//! # Examples
//!
//! ```
//! use log_front::prelude::*;
//! use log_front::info;
//!
//! let factory = LoggerFactory::null();
//! let logger = factory.get_logger("server").unwrap();
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//! ```

/// Log a message at the given level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use log_front::prelude::*;
/// # let logger = LoggerFactory::null().get_logger("example").unwrap();
/// use log_front::log;
/// log!(logger, Level::Info, "Simple message").unwrap();
/// log!(logger, Level::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use log_front::prelude::*;
/// # let logger = LoggerFactory::null().get_logger("example").unwrap();
/// use log_front::error;
/// error!(logger, "Connection failed").unwrap();
/// error!(logger, "Failed to open file: {}", "data.txt").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Get a logger named after the current module path.
///
/// Without arguments the logger comes from the default factory; given a factory
/// it comes from that one.
///
/// ```
/// # use log_front::prelude::*;
/// use log_front::logger;
/// let factory = LoggerFactory::null();
/// let log = logger!(factory).unwrap();
/// assert_eq!(log.name(), module_path!());
/// ```
#[macro_export]
macro_rules! logger {
    () => {
        $crate::get_logger(module_path!())
    };
    ($factory:expr) => {
        $factory.get_logger(module_path!())
    };
}
