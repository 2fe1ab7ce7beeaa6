//! # log_front
//!
//! A logging facade. Code logs through a [`Logger`] obtained from a
//! [`LoggerFactory`]; the factory binds each logger to whichever logging backend
//! is present in the process, or to a console writer when there is none.
//!
//! ## Features
//!
//! - **Backend discovery**: Cargo build scripts, `tracing`, `log` and syslog,
//!   probed once in that order
//! - **Injection safe**: messages are split into lines and control characters
//!   escaped before they reach any backend
//! - **Cheap when disabled**: a level check and nothing else
//! - **Testable**: listeners observe every event, clocks can be fixed
//!
//! ```
//! use log_front::prelude::*;
//!
//! let factory = LoggerFactory::basic();
//! let logger = factory.get_logger("app").unwrap();
//! logger.info("started").unwrap();
//! ```

pub mod appenders;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod proxies;

pub mod prelude {
    pub use crate::appenders::StreamAppender;
    pub use crate::core::{
        BackendHandle, BackendResolver, Clock, ClockZone, Level, ListenerGuard, LogAppender,
        LogItem, LogList, LogListener, LogListeners, LogRecord, Logger, LoggerError,
        LoggerFactory, LoggerFactoryBuilder, LoggerProxy, Result,
    };
    pub use crate::formatters::{BasicFormatter, LogFormatter, SeparatedFormatter};
}

pub use appenders::StreamAppender;
pub use core::default_factory::{get_logger, get_logger_for, get_logger_with_level};
pub use core::{
    default_factory, set_default_factory, BackendHandle, BackendResolver, BoxError, CauseChain,
    Clock, ClockZone, EnvConfig, FactoryKind, Level, ListenerGuard, LogAppender, LogItem, LogList,
    LogListener, LogListeners, LogRecord, Logger, LoggerError, LoggerFactory,
    LoggerFactoryBuilder, LoggerProxy, ProbeFailure, Resolution, Result,
};
