//! Compact console format with a separator character between fields

use super::LogFormatter;
use crate::core::encoder::{write_level, write_time};
use crate::core::error::CauseChain;
use crate::core::multiline::split_lines;
use crate::core::LogRecord;
use std::fmt;

pub const DEFAULT_SEPARATOR: char = '|';

/// Formats each line as `hh:mm:ss.mmm|name|LEVEL| text`.
#[derive(Debug, Clone)]
pub struct SeparatedFormatter {
    separator: char,
}

impl Default for SeparatedFormatter {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl SeparatedFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    fn write_lines(
        &self,
        record: &LogRecord<'_>,
        text: &str,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        for line in split_lines(text) {
            write_time(record.day_millis, out)?;
            out.write_char(self.separator)?;
            out.write_str(record.name)?;
            out.write_char(self.separator)?;
            write_level(record.level, out)?;
            out.write_char(self.separator)?;
            out.write_char(' ')?;
            out.write_str(&line)?;
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl LogFormatter for SeparatedFormatter {
    fn format(&self, record: &LogRecord<'_>, out: &mut dyn fmt::Write) -> fmt::Result {
        self.write_lines(record, record.message, out)?;
        if let Some(cause) = record.cause {
            self.write_lines(record, &CauseChain(cause).to_string(), out)?;
        }
        Ok(())
    }
}
