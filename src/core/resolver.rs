//! Backend resolution
//!
//! A [`BackendResolver`] holds an ordered list of candidate backends, each with a
//! probe that either constructs the backend's proxy or explains why it is not
//! available. Resolution runs once, on first use: the first probe that succeeds
//! is bound for the lifetime of the resolver.
//!
//! The standard order is:
//!
//! 1. `cargo`: the process is a Cargo build script
//! 2. `tracing`: a global `tracing` subscriber is installed
//! 3. `log`: a `log` logger is installed
//! 4. `syslog` (unix): a platform logging configuration exists and the syslog
//!    socket accepts a connection
//!
//! When nothing matches, loggers use the console fallback.

use super::error::{LoggerError, Result};
use super::proxy::LoggerProxy;
use crate::proxies::CargoProxy;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Constructs a backend's proxy, or fails when the backend is not present
pub type Probe = Box<dyn Fn() -> Result<Arc<dyn LoggerProxy>> + Send + Sync>;

struct Candidate {
    backend: &'static str,
    probe: Probe,
}

/// A candidate that was probed and not selected
#[derive(Debug)]
pub struct ProbeFailure {
    pub backend: &'static str,
    pub error: LoggerError,
}

/// Outcome of probing the candidates
pub struct Resolution {
    selected: Option<Arc<dyn LoggerProxy>>,
    skipped: Vec<ProbeFailure>,
}

impl Resolution {
    /// The bound backend, or `None` when loggers use the console fallback
    pub fn selected(&self) -> Option<&Arc<dyn LoggerProxy>> {
        self.selected.as_ref()
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.selected.as_ref().map(|proxy| proxy.backend_name())
    }

    /// Candidates probed before the selected one, in probe order
    pub fn skipped(&self) -> &[ProbeFailure] {
        &self.skipped
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("selected", &self.backend_name())
            .field("skipped", &self.skipped)
            .finish()
    }
}

pub struct BackendResolver {
    candidates: Vec<Candidate>,
    resolution: OnceLock<Resolution>,
}

impl BackendResolver {
    /// A resolver with no candidates; it always resolves to the fallback.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            resolution: OnceLock::new(),
        }
    }

    /// The cargo, tracing, log and syslog candidates, in that order.
    ///
    /// Backends whose crate feature is disabled are left out.
    pub fn standard() -> Self {
        let resolver = Self::new().candidate(crate::proxies::cargo_proxy::BACKEND_NAME, || {
            Ok(Arc::new(CargoProxy::new()?) as Arc<dyn LoggerProxy>)
        });

        #[cfg(feature = "tracing")]
        let resolver = resolver.candidate(crate::proxies::tracing_proxy::BACKEND_NAME, || {
            Ok(Arc::new(crate::proxies::TracingProxy::new()?) as Arc<dyn LoggerProxy>)
        });

        #[cfg(feature = "log")]
        let resolver = resolver.candidate(crate::proxies::log_proxy::BACKEND_NAME, || {
            Ok(Arc::new(crate::proxies::LogCrateProxy::new()?) as Arc<dyn LoggerProxy>)
        });

        #[cfg(unix)]
        let resolver = resolver.candidate(crate::proxies::syslog_proxy::BACKEND_NAME, || {
            Ok(Arc::new(crate::proxies::SyslogProxy::from_platform_config()?)
                as Arc<dyn LoggerProxy>)
        });

        resolver
    }

    /// Append a candidate, probed after those already added
    #[must_use = "builder methods return a new value"]
    pub fn candidate<P>(mut self, backend: &'static str, probe: P) -> Self
    where
        P: Fn() -> Result<Arc<dyn LoggerProxy>> + Send + Sync + 'static,
    {
        self.candidates.push(Candidate {
            backend,
            probe: Box::new(probe),
        });
        self
    }

    /// Names of the candidates in probe order
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.candidates.iter().map(|candidate| candidate.backend)
    }

    /// Probe the candidates on first call; later calls return the same outcome.
    pub fn resolve(&self) -> &Resolution {
        self.resolution.get_or_init(|| self.probe_all())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.get().is_some()
    }

    fn probe_all(&self) -> Resolution {
        let mut skipped = Vec::new();
        for candidate in &self.candidates {
            match (candidate.probe)() {
                Ok(proxy) => {
                    return Resolution {
                        selected: Some(proxy),
                        skipped,
                    }
                }
                Err(error) => skipped.push(ProbeFailure {
                    backend: candidate.backend,
                    error,
                }),
            }
        }
        Resolution {
            selected: None,
            skipped,
        }
    }
}

impl Default for BackendResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for BackendResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendResolver")
            .field("candidates", &self.candidates().collect::<Vec<_>>())
            .field("resolution", &self.resolution.get())
            .finish()
    }
}
