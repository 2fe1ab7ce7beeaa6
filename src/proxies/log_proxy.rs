//! Backend driving the `log` crate's global logger
//!
//! Levels map one to one onto `log::Level`, and the logger name becomes the record
//! target, so `env_logger`-style target filters apply per logger. `log` records
//! have no slot for an error value; a failure cause is flattened onto the line as
//! `<line>: <cause>`.

use crate::core::error::cause_chain;
use crate::core::multiline::flatten;
use crate::core::{BackendHandle, Level, LoggerError, LoggerProxy, Result};
use std::error::Error as StdError;

pub const BACKEND_NAME: &str = "log";

pub fn to_log_level(level: Level) -> ::log::Level {
    match level {
        Level::Trace => ::log::Level::Trace,
        Level::Debug => ::log::Level::Debug,
        Level::Info => ::log::Level::Info,
        Level::Warn => ::log::Level::Warn,
        Level::Error => ::log::Level::Error,
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogCrateProxy {
    _private: (),
}

impl LogCrateProxy {
    /// Bind to the installed `log` logger.
    ///
    /// Fails with [`LoggerError::BackendUnavailable`] when the maximum level is
    /// `Off`, which is the state before any logger is installed.
    pub fn new() -> Result<Self> {
        if ::log::max_level() == ::log::LevelFilter::Off {
            return Err(LoggerError::unavailable(
                BACKEND_NAME,
                "no logger installed (max level is Off)",
            ));
        }
        Ok(Self { _private: () })
    }
}

impl LoggerProxy for LogCrateProxy {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn open(&self, name: &str) -> Result<Box<dyn BackendHandle>> {
        Ok(Box::new(LogCrateHandle {
            target: name.to_string(),
        }))
    }
}

struct LogCrateHandle {
    target: String,
}

impl LogCrateHandle {
    fn log(&self, level: ::log::Level, args: std::fmt::Arguments<'_>) {
        ::log::logger().log(
            &::log::Record::builder()
                .args(args)
                .level(level)
                .target(&self.target)
                .build(),
        );
    }
}

impl BackendHandle for LogCrateHandle {
    fn is_enabled(&self, level: Level) -> bool {
        let level = to_log_level(level);
        level <= ::log::max_level()
            && ::log::logger().enabled(
                &::log::Metadata::builder()
                    .level(level)
                    .target(&self.target)
                    .build(),
            )
    }

    fn emit(&self, level: Level, line: &str) -> Result<()> {
        self.log(to_log_level(level), format_args!("{}", line));
        Ok(())
    }

    fn emit_with_cause(&self, line: &str, cause: &(dyn StdError + 'static)) -> Result<()> {
        let cause = cause_chain(cause);
        self.log(
            ::log::Level::Error,
            format_args!("{}: {}", line, flatten(&cause)),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping_preserves_order() {
        for pair in Level::ALL.windows(2) {
            // log::Level orders by verbosity, most severe first
            assert!(to_log_level(pair[0]) > to_log_level(pair[1]));
        }
        assert_eq!(to_log_level(Level::Warn), ::log::Level::Warn);
    }
}
