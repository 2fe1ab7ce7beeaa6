//! Formatters turning log records into text lines

pub mod basic;
pub mod separated;

pub use basic::BasicFormatter;
pub use separated::SeparatedFormatter;

use crate::core::LogRecord;
use std::fmt;

/// Renders a record as one or more complete lines, each terminated by `\n`.
///
/// Implementations must pass message and cause text through
/// [`split_lines`](crate::core::multiline::split_lines) so that every output line
/// is a single sanitized line.
pub trait LogFormatter: Send + Sync {
    fn format(&self, record: &LogRecord<'_>, out: &mut dyn fmt::Write) -> fmt::Result;
}
