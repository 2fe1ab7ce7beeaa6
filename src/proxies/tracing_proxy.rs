//! Backend driving the `tracing` dispatcher
//!
//! Levels map one to one onto `tracing::Level`. Events are emitted with target
//! `log_front` and carry the logger name in the `logger` field; a failure cause
//! is flattened onto one sanitized line and recorded as the `error` field of an
//! ERROR event.

use crate::core::error::CauseChain;
use crate::core::multiline::flatten;
use crate::core::{BackendHandle, Level, LoggerError, LoggerProxy, Result};
use std::error::Error as StdError;

pub const BACKEND_NAME: &str = "tracing";

/// Target of every event emitted by this backend
pub const TARGET: &str = "log_front";

macro_rules! dispatch_level {
    ($level:expr, $tracing_level:ident => $body:expr) => {
        match $level {
            Level::Trace => {
                const $tracing_level: ::tracing::Level = ::tracing::Level::TRACE;
                $body
            }
            Level::Debug => {
                const $tracing_level: ::tracing::Level = ::tracing::Level::DEBUG;
                $body
            }
            Level::Info => {
                const $tracing_level: ::tracing::Level = ::tracing::Level::INFO;
                $body
            }
            Level::Warn => {
                const $tracing_level: ::tracing::Level = ::tracing::Level::WARN;
                $body
            }
            Level::Error => {
                const $tracing_level: ::tracing::Level = ::tracing::Level::ERROR;
                $body
            }
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct TracingProxy {
    _private: (),
}

impl TracingProxy {
    /// Bind to the global dispatcher.
    ///
    /// Fails with [`LoggerError::BackendUnavailable`] when no global subscriber
    /// has been installed.
    pub fn new() -> Result<Self> {
        if !::tracing::dispatcher::has_been_set() {
            return Err(LoggerError::unavailable(
                BACKEND_NAME,
                "no global subscriber has been installed",
            ));
        }
        Ok(Self::current())
    }

    /// Emit to whichever dispatcher is current at each call, scoped ones included
    pub fn current() -> Self {
        Self { _private: () }
    }
}

impl LoggerProxy for TracingProxy {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn open(&self, name: &str) -> Result<Box<dyn BackendHandle>> {
        Ok(Box::new(TracingHandle {
            name: name.to_string(),
        }))
    }
}

struct TracingHandle {
    name: String,
}

impl BackendHandle for TracingHandle {
    fn is_enabled(&self, level: Level) -> bool {
        dispatch_level!(level, LEVEL => ::tracing::enabled!(target: TARGET, LEVEL))
    }

    fn emit(&self, level: Level, line: &str) -> Result<()> {
        let name = self.name.as_str();
        dispatch_level!(level, LEVEL => ::tracing::event!(
            target: TARGET,
            LEVEL,
            logger = %name,
            "{}",
            line
        ));
        Ok(())
    }

    fn emit_with_cause(&self, line: &str, cause: &(dyn StdError + 'static)) -> Result<()> {
        let cause = CauseChain(cause).to_string();
        ::tracing::event!(
            target: TARGET,
            ::tracing::Level::ERROR,
            logger = %self.name,
            error = %flatten(&cause),
            "{}",
            line
        );
        Ok(())
    }
}
