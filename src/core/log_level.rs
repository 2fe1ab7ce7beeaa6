//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    /// All levels, lowest first
    pub const ALL: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Level::rank`]
    pub const fn from_rank(rank: u8) -> Option<Level> {
        match rank {
            0 => Some(Level::Trace),
            1 => Some(Level::Debug),
            2 => Some(Level::Info),
            3 => Some(Level::Warn),
            4 => Some(Level::Error),
            _ => None,
        }
    }

    /// Whether output at this level passes a logger whose threshold is `threshold`
    #[inline]
    pub const fn is_enabled_at(self, threshold: Level) -> bool {
        self.rank() >= threshold.rank()
    }

    pub const fn to_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Trace => Magenta,
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_declaration() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        for window in Level::ALL.windows(2) {
            assert!(window[0].rank() < window[1].rank());
        }
    }

    #[test]
    fn test_is_enabled_at() {
        assert!(Level::Error.is_enabled_at(Level::Info));
        assert!(Level::Info.is_enabled_at(Level::Info));
        assert!(!Level::Debug.is_enabled_at(Level::Info));
        assert!(Level::Trace.is_enabled_at(Level::Trace));
    }

    #[test]
    fn test_parse() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" Error ".parse::<Level>().unwrap(), Level::Error);

        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Invalid log level: 'verbose'");
    }

    #[test]
    fn test_rank_roundtrip() {
        for level in Level::ALL {
            assert_eq!(Level::from_rank(level.rank()), Some(level));
        }
        assert_eq!(Level::from_rank(5), None);
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(Level::Trace.color_code().to_fg_str(), "35");
        assert_eq!(Level::Debug.color_code().to_fg_str(), "34");
        assert_eq!(Level::Info.color_code().to_fg_str(), "32");
        assert_eq!(Level::Warn.color_code().to_fg_str(), "33");
        assert_eq!(Level::Error.color_code().to_fg_str(), "31");
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");
        let level: Level = serde_json::from_str("\"TRACE\"").unwrap();
        assert_eq!(level, Level::Trace);
    }
}
