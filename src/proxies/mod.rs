//! Adapters from [`LoggerProxy`](crate::core::LoggerProxy) onto concrete backends

pub mod cargo_proxy;
#[cfg(feature = "log")]
pub mod log_proxy;
#[cfg(unix)]
pub mod syslog_proxy;
#[cfg(feature = "tracing")]
pub mod tracing_proxy;

pub use cargo_proxy::CargoProxy;
#[cfg(feature = "log")]
pub use log_proxy::LogCrateProxy;
#[cfg(unix)]
pub use syslog_proxy::SyslogProxy;
#[cfg(feature = "tracing")]
pub use tracing_proxy::TracingProxy;
