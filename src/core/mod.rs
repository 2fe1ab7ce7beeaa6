//! Core logger types and traits

pub mod appender;
pub mod clock;
pub mod config;
pub mod default_factory;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod listener;
pub mod log_item;
pub mod log_level;
pub mod logger;
pub mod multiline;
pub mod proxy;
pub mod resolver;

pub use appender::LogAppender;
pub use clock::{Clock, ClockZone};
pub use config::{EnvConfig, FactoryKind};
pub use default_factory::{default_factory, set_default_factory};
pub use error::{BoxError, CauseChain, LoggerError, Result};
pub use factory::{LoggerFactory, LoggerFactoryBuilder};
pub use listener::{ListenerGuard, LogList, LogListener, LogListeners};
pub use log_item::{LogItem, LogRecord};
pub use log_level::Level;
pub use logger::Logger;
pub use proxy::{BackendHandle, LoggerProxy};
pub use resolver::{BackendResolver, ProbeFailure, Resolution};
