//! Tests for the `log` crate backend
//!
//! A capturing `log::Log` is installed once for this test binary. Each test uses
//! its own logger names and only inspects records with those targets.

use log_front::prelude::*;
use log_front::proxies::LogCrateProxy;
use parking_lot::Mutex;
use std::sync::{Arc, Once};

struct Capture {
    records: Mutex<Vec<(log::Level, String, String)>>,
}

static CAPTURE: Capture = Capture {
    records: parking_lot::const_mutex(Vec::new()),
};

impl log::Log for Capture {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        !metadata.target().starts_with("muted")
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            self.records.lock().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

fn install() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger in this binary");
        log::set_max_level(log::LevelFilter::Debug);
    });
}

fn records_for(target: &str) -> Vec<(log::Level, String)> {
    CAPTURE
        .records
        .lock()
        .iter()
        .filter(|(_, t, _)| t == target)
        .map(|(level, _, message)| (*level, message.clone()))
        .collect()
}

fn factory() -> LoggerFactory {
    install();
    LoggerFactory::builder()
        .proxy(Arc::new(LogCrateProxy::new().unwrap()))
        .default_level(Level::Trace)
        .listeners(Arc::new(LogListeners::new()))
        .build()
}

#[test]
fn test_levels_and_target() {
    let factory = factory();
    let logger = factory.get_logger("log.levels").unwrap();

    logger.debug("debug line").unwrap();
    logger.info("info line").unwrap();
    logger.warn("warn line").unwrap();
    logger.error("error line").unwrap();

    assert_eq!(
        records_for("log.levels"),
        vec![
            (log::Level::Debug, "debug line".to_string()),
            (log::Level::Info, "info line".to_string()),
            (log::Level::Warn, "warn line".to_string()),
            (log::Level::Error, "error line".to_string()),
        ]
    );
}

#[test]
fn test_max_level_gates_logger() {
    let factory = factory();
    let logger = factory.get_logger("log.max").unwrap();

    assert!(!logger.is_trace_enabled());
    assert!(logger.is_debug_enabled());
    logger.trace("not delivered").unwrap();
    assert!(records_for("log.max").is_empty());
}

#[test]
fn test_backend_filter_gates_logger() {
    let factory = factory();
    let logger = factory.get_logger("muted.component").unwrap();

    assert!(!logger.is_error_enabled());
    logger.error("not delivered").unwrap();
    assert!(records_for("muted.component").is_empty());
}

#[test]
fn test_multi_line_and_cause() {
    let factory = factory();
    let logger = factory.get_logger("log.cause").unwrap();
    let cause = LoggerError::io_operation(
        "reading",
        "settings",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );

    logger.error_with_cause(&cause, "load failed\nusing defaults").unwrap();

    assert_eq!(
        records_for("log.cause"),
        vec![
            (log::Level::Error, "load failed".to_string()),
            (
                log::Level::Error,
                "using defaults: IO error while reading: settings Caused by: denied".to_string()
            ),
        ]
    );
}

#[test]
fn test_dynamic_factory_selects_log() {
    install();
    let factory = LoggerFactory::builder()
        .listeners(Arc::new(LogListeners::new()))
        .build();

    let logger = factory.get_logger("log.dynamic").unwrap();
    assert_eq!(logger.backend_name(), "log");

    let resolution = factory.resolution().unwrap();
    let skipped: Vec<_> = resolution.skipped().iter().map(|f| f.backend).collect();
    assert_eq!(skipped, vec!["cargo", "tracing"]);
}
