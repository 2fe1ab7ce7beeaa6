//! The process-wide default factory
//!
//! Built on first use from the environment (see [`config`](super::config)).
//! Problems with the environment settings are logged at ERROR through the new
//! factory itself, under the logger name `log_front`.

use super::config::{env_config, EnvConfig, FactoryKind};
use super::error::{LoggerError, Result};
use super::factory::LoggerFactory;
use super::log_level::Level;
use super::logger::Logger;
use crate::proxies::CargoProxy;
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT_FACTORY: RwLock<Option<Arc<LoggerFactory>>> = parking_lot::const_rwlock(None);

/// Name of the logger reporting configuration problems
pub const DIAGNOSTICS_LOGGER: &str = "log_front";

/// The default factory, built from the environment on first call
pub fn default_factory() -> Arc<LoggerFactory> {
    if let Some(factory) = DEFAULT_FACTORY.read().as_ref() {
        return Arc::clone(factory);
    }

    let mut slot = DEFAULT_FACTORY.write();
    if let Some(factory) = slot.as_ref() {
        return Arc::clone(factory);
    }
    let (factory, problems) = factory_from_config(env_config());
    let factory = Arc::new(factory);
    *slot = Some(Arc::clone(&factory));
    drop(slot);

    report_problems(&factory, &problems);
    factory
}

/// Replace the default factory, returning the previous one.
///
/// Loggers already handed out keep their backend.
pub fn set_default_factory(factory: Arc<LoggerFactory>) -> Option<Arc<LoggerFactory>> {
    DEFAULT_FACTORY.write().replace(factory)
}

/// Build the factory selected by `config`.
///
/// Returns the factory and every problem found, each as a message to log. A kind
/// whose backend cannot be constructed falls back to the dynamic factory.
pub fn factory_from_config(config: &EnvConfig) -> (LoggerFactory, Vec<String>) {
    let mut problems = config.problems.clone();
    let factory = match factory_for(config.factory) {
        Ok(factory) => factory,
        Err(e) => {
            problems.push(format!(
                "cannot use {} factory, using {} factory: {}",
                config.factory,
                FactoryKind::Dynamic,
                e
            ));
            LoggerFactory::dynamic()
        }
    };
    factory.set_default_level(config.default_level);
    (factory, problems)
}

/// Construct the factory of the given kind
pub fn factory_for(kind: FactoryKind) -> Result<LoggerFactory> {
    let factory = match kind {
        FactoryKind::Dynamic => LoggerFactory::dynamic(),
        FactoryKind::Basic => LoggerFactory::basic(),
        FactoryKind::Console => LoggerFactory::console(),
        FactoryKind::Cargo => LoggerFactory::proxy(Arc::new(CargoProxy::new()?)),
        #[cfg(feature = "tracing")]
        FactoryKind::Tracing => {
            LoggerFactory::proxy(Arc::new(crate::proxies::TracingProxy::new()?))
        }
        #[cfg(feature = "log")]
        FactoryKind::Log => LoggerFactory::proxy(Arc::new(crate::proxies::LogCrateProxy::new()?)),
        #[cfg(unix)]
        FactoryKind::Syslog => {
            LoggerFactory::proxy(Arc::new(crate::proxies::SyslogProxy::from_platform_config()?))
        }
        FactoryKind::Null => LoggerFactory::null(),
        #[allow(unreachable_patterns)]
        other => {
            return Err(LoggerError::unavailable(
                other.to_str(),
                "not supported by this build",
            ))
        }
    };
    Ok(factory)
}

fn report_problems(factory: &LoggerFactory, problems: &[String]) {
    if problems.is_empty() {
        return;
    }
    if let Ok(logger) = factory.get_logger(DIAGNOSTICS_LOGGER) {
        for problem in problems {
            // Nowhere left to report a failure of the diagnostics logger itself
            let _ = logger.error(problem);
        }
    }
}

/// Logger from the default factory
pub fn get_logger(name: &str) -> Result<Arc<Logger>> {
    default_factory().get_logger(name)
}

pub fn get_logger_with_level(name: &str, level: Level) -> Result<Arc<Logger>> {
    default_factory().get_logger_with_level(name, level)
}

/// Logger from the default factory named after the type `T`
pub fn get_logger_for<T: ?Sized>() -> Result<Arc<Logger>> {
    default_factory().get_logger_for::<T>()
}
