//! Appender trait for formatted log output destinations

use super::{error::Result, log_item::LogRecord};

/// Destination for records of loggers that are not bound to a backend.
///
/// One appender is shared by many loggers, so implementations synchronise
/// internally and take `&self`.
pub trait LogAppender: Send + Sync {
    fn append(&self, record: &LogRecord<'_>) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
