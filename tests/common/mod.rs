//! Helpers shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use log_front::prelude::*;
use parking_lot::Mutex;
use std::error::Error as StdError;
use std::io::{self, Write};
use std::sync::Arc;

/// 14:43:24.000 UTC
pub fn event_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 14, 43, 24)
        .single()
        .expect("valid timestamp")
}

pub fn fixed_clock() -> Clock {
    Clock::fixed(event_time(), ClockZone::Utc)
}

/// A writer whose output the test can read back
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf-8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that always fails
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }
}

/// A factory writing `formatter` output to a buffer, with a fixed clock
pub fn buffered_factory<F: LogFormatter + 'static>(
    formatter: F,
    listeners: Arc<LogListeners>,
) -> (LoggerFactory, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let factory = LoggerFactory::builder()
        .appender(Arc::new(StreamAppender::new(Box::new(buffer.clone()), formatter)))
        .clock(fixed_clock())
        .default_level(Level::Info)
        .listeners(listeners)
        .build();
    (factory, buffer)
}

/// What a [`RecordingProxy`] handle was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Line {
        name: String,
        level: Level,
        line: String,
    },
    WithCause {
        name: String,
        line: String,
        cause: String,
    },
}

/// A backend that records every call; names starting with `refuse` cannot be opened
#[derive(Default)]
pub struct RecordingProxy {
    pub emitted: Arc<Mutex<Vec<Emitted>>>,
    pub threshold: Option<Level>,
    pub failing: bool,
}

impl RecordingProxy {
    pub fn emitted(&self) -> Vec<Emitted> {
        self.emitted.lock().clone()
    }
}

impl LoggerProxy for RecordingProxy {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    fn open(&self, name: &str) -> Result<Box<dyn BackendHandle>> {
        if name.starts_with("refuse") {
            return Err(LoggerError::backend("recording", "unknown logger"));
        }
        Ok(Box::new(RecordingHandle {
            name: name.to_string(),
            emitted: Arc::clone(&self.emitted),
            threshold: self.threshold,
            failing: self.failing,
        }))
    }
}

struct RecordingHandle {
    name: String,
    emitted: Arc<Mutex<Vec<Emitted>>>,
    threshold: Option<Level>,
    failing: bool,
}

impl BackendHandle for RecordingHandle {
    fn is_enabled(&self, level: Level) -> bool {
        self.threshold.map_or(true, |t| level.is_enabled_at(t))
    }

    fn emit(&self, level: Level, line: &str) -> Result<()> {
        if self.failing {
            return Err(LoggerError::backend_source(
                "recording",
                "emit failed",
                io::Error::new(io::ErrorKind::Other, "backend down"),
            ));
        }
        self.emitted.lock().push(Emitted::Line {
            name: self.name.clone(),
            level,
            line: line.to_string(),
        });
        Ok(())
    }

    fn emit_with_cause(&self, line: &str, cause: &(dyn StdError + 'static)) -> Result<()> {
        self.emitted.lock().push(Emitted::WithCause {
            name: self.name.clone(),
            line: line.to_string(),
            cause: cause.to_string(),
        });
        Ok(())
    }
}
