//! Main logger implementation

use super::{
    appender::LogAppender,
    clock::Clock,
    error::{cause_chain, Result},
    listener::LogListeners,
    log_item::{LogItem, LogRecord},
    log_level::Level,
    multiline::split_lines,
    proxy::BackendHandle,
};
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Where a logger sends its output, fixed when the logger is created
pub(crate) enum Backend {
    /// A handle opened on a resolved backend; receives sanitized lines
    Proxy {
        backend: &'static str,
        handle: Box<dyn BackendHandle>,
    },
    /// The formatting fallback; receives whole records
    Appender(Arc<dyn LogAppender>),
    /// Discards everything
    Null,
}

/// A named logger obtained from a [`LoggerFactory`](crate::LoggerFactory).
///
/// Every logging call checks the gate first: the level must be at or above the
/// logger's threshold, and the bound backend must accept it. Calls that pass are
/// broadcast to listeners, then split into sanitized lines and forwarded.
///
/// Logging calls return `Err` when the backend or the output stream fails.
pub struct Logger {
    name: String,
    level: AtomicU8,
    clock: Clock,
    backend: Backend,
    listeners: Arc<LogListeners>,
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        level: Level,
        clock: Clock,
        backend: Backend,
        listeners: Arc<LogListeners>,
    ) -> Self {
        Self {
            name: name.into(),
            level: AtomicU8::new(level.rank()),
            clock,
            backend,
            listeners,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        Level::from_rank(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Change the threshold; later calls from any thread observe the new value
    pub fn set_level(&self, level: Level) {
        self.level.store(level.rank(), Ordering::Relaxed);
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Name of the backend this logger writes to
    pub fn backend_name(&self) -> &str {
        match &self.backend {
            Backend::Proxy { backend, .. } => backend,
            Backend::Appender(appender) => appender.name(),
            Backend::Null => "null",
        }
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        if !level.is_enabled_at(self.level()) {
            return false;
        }
        match &self.backend {
            Backend::Proxy { handle, .. } => handle.is_enabled(level),
            Backend::Appender(_) => true,
            Backend::Null => false,
        }
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    pub fn log(&self, level: Level, message: impl fmt::Display) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        self.write(self.clock.now(), level, &message.to_string(), None)
    }

    /// Log the value produced by `supplier`, which runs only when `level` passes
    /// the gate.
    pub fn log_with<M, F>(&self, level: Level, supplier: F) -> Result<()>
    where
        M: fmt::Display,
        F: FnOnce() -> M,
    {
        if !self.is_enabled(level) {
            return Ok(());
        }
        self.write(self.clock.now(), level, &supplier().to_string(), None)
    }

    /// Log with an explicit event time instead of the logger's clock
    pub fn log_at(&self, time: DateTime<Utc>, level: Level, message: impl fmt::Display) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        self.write(time, level, &message.to_string(), None)
    }

    pub fn trace(&self, message: impl fmt::Display) -> Result<()> {
        self.log(Level::Trace, message)
    }

    pub fn debug(&self, message: impl fmt::Display) -> Result<()> {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: impl fmt::Display) -> Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warn(&self, message: impl fmt::Display) -> Result<()> {
        self.log(Level::Warn, message)
    }

    pub fn error(&self, message: impl fmt::Display) -> Result<()> {
        self.log(Level::Error, message)
    }

    /// Log at ERROR with `cause` and its sources attached.
    ///
    /// Backends receive the cause once, together with the last line of the
    /// message.
    pub fn error_with_cause(
        &self,
        cause: &(dyn StdError + 'static),
        message: impl fmt::Display,
    ) -> Result<()> {
        if !self.is_enabled(Level::Error) {
            return Ok(());
        }
        self.write(self.clock.now(), Level::Error, &message.to_string(), Some(cause))
    }

    fn write(
        &self,
        time: DateTime<Utc>,
        level: Level,
        message: &str,
        cause: Option<&(dyn StdError + 'static)>,
    ) -> Result<()> {
        if self.listeners.present() {
            let mut item = LogItem::new(time, &self.name, level, message);
            if let Some(cause) = cause {
                item = item.with_cause(cause_chain(cause));
            }
            self.listeners.invoke_all(&item);
        }

        match &self.backend {
            Backend::Proxy { handle, .. } => {
                let mut lines = split_lines(message).peekable();
                while let Some(line) = lines.next() {
                    match cause {
                        Some(cause) if lines.peek().is_none() => {
                            handle.emit_with_cause(&line, cause)?
                        }
                        _ => handle.emit(level, &line)?,
                    }
                }
                Ok(())
            }
            Backend::Appender(appender) => appender.append(&LogRecord {
                time,
                day_millis: self.clock.day_millis(&time),
                name: &self.name,
                level,
                message,
                cause,
            }),
            Backend::Null => Ok(()),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("clock", &self.clock)
            .field("backend", &self.backend_name())
            .finish()
    }
}
