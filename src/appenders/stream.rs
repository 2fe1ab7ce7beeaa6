//! Appender writing formatted records to an `io::Write` stream

use crate::core::{LogAppender, LogRecord, LoggerError, Result};
use crate::formatters::{BasicFormatter, LogFormatter, SeparatedFormatter};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Writes each record through a [`LogFormatter`] to a byte stream.
///
/// All lines of one record are written under a single lock, so records logged
/// concurrently from different threads never interleave.
pub struct StreamAppender<F: LogFormatter> {
    formatter: F,
    writer: Mutex<Box<dyn Write + Send>>,
    name: String,
}

impl<F: LogFormatter> StreamAppender<F> {
    pub fn new(writer: Box<dyn Write + Send>, formatter: F) -> Self {
        Self {
            formatter,
            writer: Mutex::new(writer),
            name: "stream".to_string(),
        }
    }

    pub fn stdout(formatter: F) -> Self {
        Self::new(Box::new(io::stdout()), formatter).with_name("stdout")
    }

    pub fn stderr(formatter: F) -> Self {
        Self::new(Box::new(io::stderr()), formatter).with_name("stderr")
    }

    /// Name used in errors raised by this appender
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }
}

impl StreamAppender<BasicFormatter> {
    /// The console fallback: coloured basic format on stdout
    pub fn basic() -> Self {
        Self::stdout(BasicFormatter::new())
    }
}

impl StreamAppender<SeparatedFormatter> {
    pub fn console() -> Self {
        Self::stdout(SeparatedFormatter::new())
    }
}

impl<F: LogFormatter> LogAppender for StreamAppender<F> {
    fn append(&self, record: &LogRecord<'_>) -> Result<()> {
        let mut output = String::with_capacity(128);
        self.formatter
            .format(record, &mut output)
            .map_err(|_| LoggerError::formatter(self.name.as_str(), "formatter reported an error"))?;

        let mut writer = self.writer.lock();
        writer
            .write_all(output.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::io_operation("writing log output", self.name.as_str(), e))
    }

    fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing log output", self.name.as_str(), e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;
    use chrono::Utc;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
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

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(message: &str) -> LogRecord<'_> {
        LogRecord {
            time: Utc::now(),
            day_millis: 53_004_000,
            name: "NAME",
            level: Level::Info,
            message,
            cause: None,
        }
    }

    #[test]
    fn test_writes_formatted_lines() {
        let buffer = SharedBuffer::default();
        let appender = StreamAppender::new(
            Box::new(buffer.clone()),
            BasicFormatter::new().with_coloured_level(false),
        );

        appender.append(&record("Coloured")).unwrap();
        appender.append(&record("a\nb")).unwrap();

        assert_eq!(
            buffer.contents(),
            "14:43:24.000 INFO  NAME: Coloured\n\
             14:43:24.000 INFO  NAME: a\n\
             14:43:24.000 INFO  NAME: b\n"
        );
    }

    #[test]
    fn test_write_failure_is_reported() {
        let appender =
            StreamAppender::new(Box::new(BrokenPipe), SeparatedFormatter::new()).with_name("pipe");

        let err = appender.append(&record("lost")).unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("pipe"));
    }

    #[test]
    fn test_names() {
        assert_eq!(StreamAppender::<BasicFormatter>::basic().name(), "stdout");
        assert_eq!(StreamAppender::stderr(SeparatedFormatter::new()).name(), "stderr");
        assert_eq!(StreamAppender::<SeparatedFormatter>::console().formatter().separator(), '|');
    }
}
