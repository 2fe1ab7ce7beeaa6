//! The default console format: `hh:mm:ss.mmm LEVEL name: message`

use super::LogFormatter;
use crate::core::encoder::{
    write_level5, write_level5_coloured, write_name_with_limit, write_time, MIN_NAME_LIMIT,
};
use crate::core::error::CauseChain;
use crate::core::multiline::split_lines;
use crate::core::LogRecord;
use std::fmt::{self, Write};

/// Default length limit for display of the logger name
pub const DEFAULT_NAME_LENGTH_LIMIT: usize = 40;

/// Formats each line as `hh:mm:ss.mmm LEVEL name: text`, with the level padded to
/// five characters and coloured by default.
///
/// # Example
///
/// ```
/// use log_front::formatters::{BasicFormatter, LogFormatter};
/// use log_front::{Level, LogRecord};
/// use chrono::Utc;
///
/// let formatter = BasicFormatter::new().with_coloured_level(false);
/// let record = LogRecord {
///     time: Utc::now(),
///     day_millis: 53_004_000,
///     name: "NAME",
///     level: Level::Info,
///     message: "Plain",
///     cause: None,
/// };
/// let mut out = String::new();
/// formatter.format(&record, &mut out).unwrap();
/// assert_eq!(out, "14:43:24.000 INFO  NAME: Plain\n");
/// ```
#[derive(Debug, Clone)]
pub struct BasicFormatter {
    name_length_limit: usize,
    coloured_level: bool,
}

impl Default for BasicFormatter {
    fn default() -> Self {
        Self {
            name_length_limit: DEFAULT_NAME_LENGTH_LIMIT,
            coloured_level: true,
        }
    }
}

impl BasicFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display limit for logger names; values below 8 are raised to 8.
    #[must_use]
    pub fn with_name_length_limit(mut self, limit: usize) -> Self {
        self.name_length_limit = limit.max(MIN_NAME_LIMIT);
        self
    }

    #[must_use]
    pub fn with_coloured_level(mut self, coloured: bool) -> Self {
        self.coloured_level = coloured;
        self
    }

    pub fn name_length_limit(&self) -> usize {
        self.name_length_limit
    }

    pub fn is_coloured_level(&self) -> bool {
        self.coloured_level
    }

    fn write_lines(
        &self,
        record: &LogRecord<'_>,
        text: &str,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        for line in split_lines(text) {
            write_time(record.day_millis, out)?;
            out.write_char(' ')?;
            if self.coloured_level {
                write_level5_coloured(record.level, out)?;
            } else {
                write_level5(record.level, out)?;
            }
            out.write_char(' ')?;
            write_name_with_limit(self.name_length_limit, record.name, out)?;
            out.write_str(": ")?;
            out.write_str(&line)?;
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl LogFormatter for BasicFormatter {
    fn format(&self, record: &LogRecord<'_>, out: &mut dyn fmt::Write) -> fmt::Result {
        self.write_lines(record, record.message, out)?;
        if let Some(cause) = record.cause {
            self.write_lines(record, &CauseChain(cause).to_string(), out)?;
        }
        Ok(())
    }
}
