//! Log event structures

use super::log_level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

/// A log event as delivered to listeners.
///
/// The message is the text passed to the logging call before it is split into
/// lines, and the cause is the rendered error chain of an `error_with_cause` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogItem {
    pub time: DateTime<Utc>,
    pub name: String,
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cause: Option<String>,
}

impl LogItem {
    pub fn new(time: DateTime<Utc>, name: &str, level: Level, message: &str) -> Self {
        Self {
            time,
            name: name.to_string(),
            level,
            message: message.to_string(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// A log event on its way to an appender.
///
/// `day_millis` is the event time as milliseconds since midnight in the zone of
/// the originating logger's clock.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub time: DateTime<Utc>,
    pub day_millis: u32,
    pub name: &'a str,
    pub level: Level,
    pub message: &'a str,
    pub cause: Option<&'a (dyn StdError + 'static)>,
}
