//! Logger factory with backend binding and a per-name cache

use super::{
    appender::LogAppender,
    clock::Clock,
    config::system_default_level,
    error::{LoggerError, Result},
    listener::LogListeners,
    log_level::Level,
    logger::{Backend, Logger},
    proxy::LoggerProxy,
    resolver::{BackendResolver, Resolution},
};
use crate::appenders::StreamAppender;
use crate::formatters::{BasicFormatter, LogFormatter, SeparatedFormatter};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

enum LoggerSource {
    Dynamic(BackendResolver),
    Proxy(Arc<dyn LoggerProxy>),
    Appender(Arc<dyn LogAppender>),
    Null,
}

/// Creates and caches [`Logger`]s.
///
/// Asking twice for the same name with the same level and clock returns the same
/// logger. Asking with a different level or clock replaces the cached one.
///
/// # Example
///
/// ```
/// use log_front::prelude::*;
///
/// let factory = LoggerFactory::null();
/// let a = factory.get_logger("app.db").unwrap();
/// let b = factory.get_logger("app.db").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
///
/// let c = factory.get_logger_with_level("app.db", Level::Trace).unwrap();
/// assert!(!std::sync::Arc::ptr_eq(&a, &c));
/// ```
pub struct LoggerFactory {
    source: LoggerSource,
    fallback: Arc<dyn LogAppender>,
    default_level: RwLock<Level>,
    default_clock: RwLock<Clock>,
    cache: Mutex<HashMap<String, Arc<Logger>>>,
    listeners: Arc<LogListeners>,
}

impl LoggerFactory {
    #[must_use]
    pub fn builder() -> LoggerFactoryBuilder {
        LoggerFactoryBuilder::new()
    }

    /// Bind loggers to the first available backend, or the basic console format
    pub fn dynamic() -> Self {
        Self::builder().build()
    }

    /// Write through `appender` without probing for a backend
    pub fn formatting(appender: Arc<dyn LogAppender>) -> Self {
        Self::builder().appender(appender).build()
    }

    /// Formatting factory writing the basic format to stdout
    pub fn basic() -> Self {
        Self::formatting(Arc::new(StreamAppender::<BasicFormatter>::basic()))
    }

    /// Formatting factory writing the separated format to stdout
    pub fn console() -> Self {
        Self::formatting(Arc::new(StreamAppender::<SeparatedFormatter>::console()))
    }

    /// Bind every logger to `proxy`
    pub fn proxy(proxy: Arc<dyn LoggerProxy>) -> Self {
        Self::builder().proxy(proxy).build()
    }

    /// Loggers that discard everything
    pub fn null() -> Self {
        Self::builder().null_backend().build()
    }

    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>> {
        self.get_logger_with(name, self.default_level(), self.default_clock())
    }

    pub fn get_logger_with_level(&self, name: &str, level: Level) -> Result<Arc<Logger>> {
        self.get_logger_with(name, level, self.default_clock())
    }

    pub fn get_logger_with_clock(&self, name: &str, clock: Clock) -> Result<Arc<Logger>> {
        self.get_logger_with(name, self.default_level(), clock)
    }

    /// Logger named after the type `T`
    pub fn get_logger_for<T: ?Sized>(&self) -> Result<Arc<Logger>> {
        self.get_logger(std::any::type_name::<T>())
    }

    pub fn get_logger_with(&self, name: &str, level: Level, clock: Clock) -> Result<Arc<Logger>> {
        validate_name(name)?;

        if let Some(logger) = self.cached(name, level, &clock) {
            return Ok(logger);
        }

        // Opening a backend handle may do I/O, so it happens outside the lock
        let logger = Arc::new(Logger::new(
            name,
            level,
            clock,
            self.bind(name),
            Arc::clone(&self.listeners),
        ));

        let mut cache = self.cache.lock();
        if let Some(existing) = cache.get(name) {
            if existing.level() == level && existing.clock() == logger.clock() {
                return Ok(Arc::clone(existing));
            }
        }
        cache.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    fn cached(&self, name: &str, level: Level, clock: &Clock) -> Option<Arc<Logger>> {
        let cache = self.cache.lock();
        cache
            .get(name)
            .filter(|logger| logger.level() == level && logger.clock() == clock)
            .cloned()
    }

    fn bind(&self, name: &str) -> Backend {
        let proxy = match &self.source {
            LoggerSource::Dynamic(resolver) => resolver.resolve().selected().cloned(),
            LoggerSource::Proxy(proxy) => Some(Arc::clone(proxy)),
            LoggerSource::Appender(appender) => return Backend::Appender(Arc::clone(appender)),
            LoggerSource::Null => return Backend::Null,
        };

        match proxy.map(|proxy| (proxy.backend_name(), proxy.open(name))) {
            Some((backend, Ok(handle))) => Backend::Proxy { backend, handle },
            // No backend, or it refused this name: that logger uses the fallback
            Some((_, Err(_))) | None => Backend::Appender(Arc::clone(&self.fallback)),
        }
    }

    pub fn default_level(&self) -> Level {
        *self.default_level.read()
    }

    /// Level for loggers requested without one from now on
    pub fn set_default_level(&self, level: Level) {
        *self.default_level.write() = level;
    }

    pub fn default_clock(&self) -> Clock {
        self.default_clock.read().clone()
    }

    pub fn set_default_clock(&self, clock: Clock) {
        *self.default_clock.write() = clock;
    }

    pub fn listeners(&self) -> &Arc<LogListeners> {
        &self.listeners
    }

    /// Outcome of backend probing, for dynamic factories
    pub fn resolution(&self) -> Option<&Resolution> {
        match &self.source {
            LoggerSource::Dynamic(resolver) => Some(resolver.resolve()),
            _ => None,
        }
    }

    /// Number of cached loggers
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Flush the appender behind formatting loggers
    pub fn flush(&self) -> Result<()> {
        match &self.source {
            LoggerSource::Appender(appender) => appender.flush(),
            _ => self.fallback.flush(),
        }
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::dynamic()
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            LoggerSource::Dynamic(_) => "dynamic",
            LoggerSource::Proxy(proxy) => proxy.backend_name(),
            LoggerSource::Appender(appender) => appender.name(),
            LoggerSource::Null => "null",
        };
        f.debug_struct("LoggerFactory")
            .field("source", &source)
            .field("default_level", &self.default_level())
            .field("loggers", &self.len())
            .finish()
    }
}

/// Check that a logger name is non-empty printable ASCII
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LoggerError::invalid_name(name, "name must not be empty"));
    }
    if !name.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        return Err(LoggerError::invalid_name(
            name,
            "name must contain only printable ASCII characters",
        ));
    }
    Ok(())
}

/// Builder for [`LoggerFactory`]
///
/// # Example
///
/// ```
/// use log_front::prelude::*;
/// use log_front::formatters::SeparatedFormatter;
/// use std::sync::Arc;
///
/// let factory = LoggerFactory::builder()
///     .default_level(Level::Debug)
///     .clock(Clock::system_utc())
///     .appender(Arc::new(StreamAppender::stderr(SeparatedFormatter::new())))
///     .build();
/// assert_eq!(factory.default_level(), Level::Debug);
/// ```
pub struct LoggerFactoryBuilder {
    source: Option<LoggerSource>,
    default_level: Option<Level>,
    clock: Clock,
    listeners: Option<Arc<LogListeners>>,
    fallback: Option<Arc<dyn LogAppender>>,
}

impl LoggerFactoryBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            default_level: None,
            clock: Clock::default(),
            listeners: None,
            fallback: None,
        }
    }

    /// Level for loggers requested without one; defaults to the process default
    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: Level) -> Self {
        self.default_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Report to `listeners` instead of the process-wide registry
    #[must_use = "builder methods return a new value"]
    pub fn listeners(mut self, listeners: Arc<LogListeners>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Probe the candidates of `resolver` for a backend
    #[must_use = "builder methods return a new value"]
    pub fn resolver(mut self, resolver: BackendResolver) -> Self {
        self.source = Some(LoggerSource::Dynamic(resolver));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn proxy(mut self, proxy: Arc<dyn LoggerProxy>) -> Self {
        self.source = Some(LoggerSource::Proxy(proxy));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn LogAppender>) -> Self {
        self.source = Some(LoggerSource::Appender(appender));
        self
    }

    /// Write with `formatter` to stdout
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: LogFormatter + 'static>(self, formatter: F) -> Self {
        self.appender(Arc::new(StreamAppender::stdout(formatter)))
    }

    #[must_use = "builder methods return a new value"]
    pub fn null_backend(mut self) -> Self {
        self.source = Some(LoggerSource::Null);
        self
    }

    /// Appender used when no backend is available or a backend refuses a name.
    ///
    /// Defaults to the basic format on stdout.
    #[must_use = "builder methods return a new value"]
    pub fn fallback_appender(mut self, appender: Arc<dyn LogAppender>) -> Self {
        self.fallback = Some(appender);
        self
    }

    pub fn build(self) -> LoggerFactory {
        LoggerFactory {
            source: self
                .source
                .unwrap_or_else(|| LoggerSource::Dynamic(BackendResolver::standard())),
            fallback: self.fallback.unwrap_or_else(|| {
                Arc::new(StreamAppender::<BasicFormatter>::basic()) as Arc<dyn LogAppender>
            }),
            default_level: RwLock::new(self.default_level.unwrap_or_else(system_default_level)),
            default_clock: RwLock::new(self.clock),
            cache: Mutex::new(HashMap::new()),
            listeners: self
                .listeners
                .unwrap_or_else(|| Arc::clone(LogListeners::global())),
        }
    }
}

impl Default for LoggerFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
