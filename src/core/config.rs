//! Process configuration read from the environment
//!
//! The environment is read once, the first time the process defaults are needed.
//! Problems found in it are collected rather than reported here; the default
//! factory logs them through itself once it exists.

use super::error::LoggerError;
use super::log_level::Level;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Default threshold for loggers created without an explicit level
pub const DEFAULT_LEVEL_ENV: &str = "LOG_FRONT_DEFAULT_LEVEL";

/// Factory kind replacing automatic backend resolution
pub const DEFAULT_FACTORY_ENV: &str = "LOG_FRONT_DEFAULT_FACTORY";

/// Path of a platform logging configuration; syslog is only considered when it exists
pub const PLATFORM_CONFIG_ENV: &str = "LOG_FRONT_PLATFORM_CONFIG";

/// Socket path of the local syslog daemon
pub const SYSLOG_PATH_ENV: &str = "LOG_FRONT_SYSLOG_PATH";

/// Kind of default factory selectable through [`DEFAULT_FACTORY_ENV`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FactoryKind {
    /// Probe for a backend, falling back to the basic console format
    #[default]
    Dynamic,
    Basic,
    Console,
    Cargo,
    Tracing,
    Log,
    Syslog,
    Null,
}

impl FactoryKind {
    pub const ALL: [FactoryKind; 8] = [
        FactoryKind::Dynamic,
        FactoryKind::Basic,
        FactoryKind::Console,
        FactoryKind::Cargo,
        FactoryKind::Tracing,
        FactoryKind::Log,
        FactoryKind::Syslog,
        FactoryKind::Null,
    ];

    pub const fn to_str(self) -> &'static str {
        match self {
            FactoryKind::Dynamic => "dynamic",
            FactoryKind::Basic => "basic",
            FactoryKind::Console => "console",
            FactoryKind::Cargo => "cargo",
            FactoryKind::Tracing => "tracing",
            FactoryKind::Log => "log",
            FactoryKind::Syslog => "syslog",
            FactoryKind::Null => "null",
        }
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for FactoryKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FactoryKind::ALL
            .into_iter()
            .find(|kind| kind.to_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                LoggerError::config(
                    DEFAULT_FACTORY_ENV,
                    format!("unknown factory kind '{}'", wanted),
                )
            })
    }
}

/// Settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub default_level: Level,
    pub factory: FactoryKind,
    /// Problems found while reading, each to be logged at ERROR
    pub problems: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            default_level: Level::Info,
            factory: FactoryKind::Dynamic,
            problems: Vec::new(),
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset and invalid values keep the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(DEFAULT_LEVEL_ENV) {
            match value.parse::<Level>() {
                Ok(level) => config.default_level = level,
                Err(e) => config.problems.push(format!(
                    "{} ignored, using {}: {}",
                    DEFAULT_LEVEL_ENV, config.default_level, e
                )),
            }
        }

        if let Some(value) = lookup(DEFAULT_FACTORY_ENV) {
            match value.parse::<FactoryKind>() {
                Ok(kind) => config.factory = kind,
                Err(e) => config.problems.push(format!(
                    "{} ignored, using {} factory: {}",
                    DEFAULT_FACTORY_ENV, config.factory, e
                )),
            }
        }

        config
    }
}

/// The process environment configuration, read on first call
pub fn env_config() -> &'static EnvConfig {
    static CONFIG: OnceLock<EnvConfig> = OnceLock::new();
    CONFIG.get_or_init(EnvConfig::from_env)
}

/// Default level for new factories, from [`DEFAULT_LEVEL_ENV`] or INFO
pub fn system_default_level() -> Level {
    env_config().default_level
}
