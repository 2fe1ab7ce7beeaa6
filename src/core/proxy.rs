//! Capability interface for logging backends
//!
//! Each backend family the facade can drive is wrapped in a [`LoggerProxy`]. The
//! proxy is created once per process; for every logger name it opens a
//! [`BackendHandle`] that the [`Logger`](crate::Logger) keeps for its lifetime.
//! Lines handed to a handle have already been sanitized, so they never contain
//! line breaks or control characters.

use super::error::Result;
use super::log_level::Level;
use std::error::Error as StdError;

pub trait LoggerProxy: Send + Sync {
    /// Short identifier of the backend, used in errors and diagnostics
    fn backend_name(&self) -> &'static str;

    /// Open the backend's native logger for `name`
    fn open(&self, name: &str) -> Result<Box<dyn BackendHandle>>;
}

pub trait BackendHandle: Send + Sync {
    /// Whether the backend itself would output at this level
    fn is_enabled(&self, level: Level) -> bool;

    fn emit(&self, level: Level, line: &str) -> Result<()>;

    /// Emit a line at error level with a failure cause attached.
    fn emit_with_cause(&self, line: &str, cause: &(dyn StdError + 'static)) -> Result<()>;
}
