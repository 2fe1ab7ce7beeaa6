//! Backend writing to the local syslog daemon
//!
//! Messages are RFC 3164 datagrams `<PRI>name: line` sent over the daemon's unix
//! socket with facility `user`. Severity mapping:
//!
//! | Level        | Severity     |
//! |--------------|--------------|
//! | TRACE, DEBUG | debug (7)    |
//! | INFO         | info (6)     |
//! | WARN         | warning (4)  |
//! | ERROR        | err (3)      |
//!
//! The daemon has no per-name filter, so every level is enabled here and the
//! logger's own threshold decides.

use crate::core::config::{PLATFORM_CONFIG_ENV, SYSLOG_PATH_ENV};
use crate::core::error::cause_chain;
use crate::core::multiline::flatten;
use crate::core::{BackendHandle, Level, LoggerError, LoggerProxy, Result};
use std::error::Error as StdError;
use std::ffi::OsString;
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BACKEND_NAME: &str = "syslog";

pub const DEFAULT_SYSLOG_PATH: &str = "/dev/log";

/// Facility `user` (1), shifted into the PRI value
const FACILITY_USER: u8 = 1 << 3;

pub const fn severity(level: Level) -> u8 {
    match level {
        Level::Trace | Level::Debug => 7,
        Level::Info => 6,
        Level::Warn => 4,
        Level::Error => 3,
    }
}

#[derive(Debug)]
pub struct SyslogProxy {
    socket: Arc<UnixDatagram>,
    path: PathBuf,
}

impl SyslogProxy {
    /// Connect to the syslog socket at `path`
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let socket = UnixDatagram::unbound()
            .and_then(|socket| socket.connect(path).map(|()| socket))
            .map_err(|e| {
                LoggerError::unavailable(
                    BACKEND_NAME,
                    format!("cannot connect to {}: {}", path.display(), e),
                )
            })?;
        Ok(Self {
            socket: Arc::new(socket),
            path: path.to_path_buf(),
        })
    }

    /// Connect when the platform logging configuration named by
    /// `LOG_FRONT_PLATFORM_CONFIG` exists.
    ///
    /// The socket path is `LOG_FRONT_SYSLOG_PATH` when set, `/dev/log` otherwise.
    pub fn from_platform_config() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// As [`from_platform_config`](Self::from_platform_config), reading variables
    /// through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let config = lookup(PLATFORM_CONFIG_ENV).ok_or_else(|| {
            LoggerError::unavailable(BACKEND_NAME, format!("{} is not set", PLATFORM_CONFIG_ENV))
        })?;
        let config = Path::new(&config);
        if !config.is_file() {
            return Err(LoggerError::unavailable(
                BACKEND_NAME,
                format!("platform configuration {} does not exist", config.display()),
            ));
        }

        let path = lookup(SYSLOG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSLOG_PATH));
        Self::connect(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LoggerProxy for SyslogProxy {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn open(&self, name: &str) -> Result<Box<dyn BackendHandle>> {
        Ok(Box::new(SyslogHandle {
            name: name.to_string(),
            socket: Arc::clone(&self.socket),
        }))
    }
}

struct SyslogHandle {
    name: String,
    socket: Arc<UnixDatagram>,
}

impl SyslogHandle {
    fn send(&self, level: Level, text: &str) -> Result<()> {
        let datagram = format!(
            "<{}>{}: {}",
            FACILITY_USER + severity(level),
            self.name,
            text
        );
        self.socket
            .send(datagram.as_bytes())
            .map(|_| ())
            .map_err(|e| LoggerError::backend_source(BACKEND_NAME, "send failed", e))
    }
}

impl BackendHandle for SyslogHandle {
    fn is_enabled(&self, _level: Level) -> bool {
        true
    }

    fn emit(&self, level: Level, line: &str) -> Result<()> {
        self.send(level, line)
    }

    fn emit_with_cause(&self, line: &str, cause: &(dyn StdError + 'static)) -> Result<()> {
        let cause = cause_chain(cause);
        self.send(Level::Error, &format!("{}: {}", line, flatten(&cause)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn daemon() -> (TempDir, UnixDatagram, SyslogProxy) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.sock");
        let daemon = UnixDatagram::bind(&path).unwrap();
        let proxy = SyslogProxy::connect(&path).unwrap();
        (dir, daemon, proxy)
    }

    fn receive(daemon: &UnixDatagram) -> String {
        let mut buf = [0u8; 1024];
        let n = daemon.recv(&mut buf).unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(severity(Level::Trace), 7);
        assert_eq!(severity(Level::Debug), 7);
        assert_eq!(severity(Level::Info), 6);
        assert_eq!(severity(Level::Warn), 4);
        assert_eq!(severity(Level::Error), 3);
    }

    #[test]
    fn test_datagram_format() {
        let (_dir, daemon, proxy) = daemon();
        let handle = proxy.open("app.db").unwrap();

        handle.emit(Level::Info, "connected").unwrap();
        assert_eq!(receive(&daemon), "<14>app.db: connected");

        handle.emit(Level::Warn, "slow query").unwrap();
        assert_eq!(receive(&daemon), "<12>app.db: slow query");
    }

    #[test]
    fn test_cause_is_appended() {
        let (_dir, daemon, proxy) = daemon();
        let handle = proxy.open("app").unwrap();
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");

        handle.emit_with_cause("query failed", &cause).unwrap();
        assert_eq!(receive(&daemon), "<11>app: query failed: timed out");
    }

    #[test]
    fn test_missing_socket_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = SyslogProxy::connect(dir.path().join("absent.sock")).unwrap_err();
        assert!(matches!(err, LoggerError::BackendUnavailable { .. }));
    }

    fn lookup(vars: Vec<(&'static str, OsString)>) -> impl Fn(&str) -> Option<OsString> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_platform_config_unset() {
        let err = SyslogProxy::from_lookup(lookup(vec![])).unwrap_err();
        assert!(matches!(err, LoggerError::BackendUnavailable { .. }));
        assert!(err.to_string().contains(PLATFORM_CONFIG_ENV));
    }

    #[test]
    fn test_platform_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let (_sock_dir, _daemon, proxy) = daemon();
        let err = SyslogProxy::from_lookup(lookup(vec![
            (PLATFORM_CONFIG_ENV, dir.path().join("syslog.conf").into()),
            (SYSLOG_PATH_ENV, proxy.path().into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, LoggerError::BackendUnavailable { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_platform_config_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let err = SyslogProxy::from_lookup(lookup(vec![(
            PLATFORM_CONFIG_ENV,
            dir.path().into(),
        )]))
        .unwrap_err();
        assert!(matches!(err, LoggerError::BackendUnavailable { .. }));
    }

    #[test]
    fn test_platform_config_present_connects() {
        let config = tempfile::NamedTempFile::new().unwrap();
        let (_dir, daemon, connected) = daemon();

        let proxy = SyslogProxy::from_lookup(lookup(vec![
            (PLATFORM_CONFIG_ENV, config.path().into()),
            (SYSLOG_PATH_ENV, connected.path().into()),
        ]))
        .unwrap();
        assert_eq!(proxy.path(), connected.path());

        proxy.open("app.sys").unwrap().emit(Level::Info, "up").unwrap();
        assert_eq!(receive(&daemon), "<14>app.sys: up");
    }

    #[test]
    fn test_platform_config_present_without_daemon() {
        let config = tempfile::NamedTempFile::new().unwrap();
        let dir = TempDir::new().unwrap();
        let err = SyslogProxy::from_lookup(lookup(vec![
            (PLATFORM_CONFIG_ENV, config.path().into()),
            (SYSLOG_PATH_ENV, dir.path().join("absent.sock").into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, LoggerError::BackendUnavailable { .. }));
    }

    #[test]
    fn test_send_failure_after_daemon_exit() {
        let (dir, daemon, proxy) = daemon();
        let handle = proxy.open("app").unwrap();
        drop(daemon);
        drop(dir);

        let err = handle.emit(Level::Error, "lost").unwrap_err();
        assert!(err.is_backend_failure());
    }
}
