//! Backend for code running inside a Cargo build script
//!
//! Cargo reads directives from a build script's stdout and shows only
//! `cargo:warning=` lines to the user by default. Level mapping:
//!
//! | Level        | Output                                     |
//! |--------------|--------------------------------------------|
//! | ERROR, WARN  | stdout, `cargo:warning=<name>: <line>`     |
//! | INFO, DEBUG, TRACE | stderr, `[<LEVEL>] <name>: <line>`   |
//!
//! Lines reaching stdout always carry the `cargo:warning=` prefix, so a logged
//! message cannot inject a build directive of its own.

use crate::core::{BackendHandle, Level, LoggerError, LoggerProxy, Result};
use crate::core::error::CauseChain;
use crate::core::multiline::flatten;
use parking_lot::Mutex;
use std::error::Error as StdError;
use std::io::{self, Write};
use std::sync::Arc;

pub const BACKEND_NAME: &str = "cargo";

/// Environment variables Cargo sets for every build script run
const BUILD_SCRIPT_VARS: [&str; 4] = ["OUT_DIR", "TARGET", "HOST", "CARGO_MANIFEST_DIR"];

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

pub struct CargoProxy {
    directives: SharedWriter,
    diagnostics: SharedWriter,
}

impl CargoProxy {
    /// Bind to the build script's stdout and stderr.
    ///
    /// Fails with [`LoggerError::BackendUnavailable`] when the process is not a
    /// build script.
    pub fn new() -> Result<Self> {
        if let Some(missing) = BUILD_SCRIPT_VARS
            .iter()
            .find(|var| std::env::var_os(var).is_none())
        {
            return Err(LoggerError::unavailable(
                BACKEND_NAME,
                format!("not running as a build script ({} is not set)", missing),
            ));
        }
        Ok(Self::with_writers(
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        ))
    }

    /// Bind to explicit writers for directives and diagnostics
    pub fn with_writers(
        directives: Box<dyn Write + Send>,
        diagnostics: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            directives: Arc::new(Mutex::new(directives)),
            diagnostics: Arc::new(Mutex::new(diagnostics)),
        }
    }
}

impl LoggerProxy for CargoProxy {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn open(&self, name: &str) -> Result<Box<dyn BackendHandle>> {
        Ok(Box::new(CargoHandle {
            name: name.to_string(),
            directives: Arc::clone(&self.directives),
            diagnostics: Arc::clone(&self.diagnostics),
        }))
    }
}

struct CargoHandle {
    name: String,
    directives: SharedWriter,
    diagnostics: SharedWriter,
}

impl CargoHandle {
    fn write(writer: &SharedWriter, text: std::fmt::Arguments<'_>) -> Result<()> {
        let mut writer = writer.lock();
        writer
            .write_fmt(text)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::backend_source(BACKEND_NAME, "write failed", e))
    }
}

impl BackendHandle for CargoHandle {
    // Cargo has no verbosity switch for build scripts; the Logger threshold decides.
    fn is_enabled(&self, _level: Level) -> bool {
        true
    }

    fn emit(&self, level: Level, line: &str) -> Result<()> {
        match level {
            Level::Error | Level::Warn => Self::write(
                &self.directives,
                format_args!("cargo:warning={}: {}", self.name, line),
            ),
            Level::Info | Level::Debug | Level::Trace => Self::write(
                &self.diagnostics,
                format_args!("[{}] {}: {}", level, self.name, line),
            ),
        }
    }

    fn emit_with_cause(&self, line: &str, cause: &(dyn StdError + 'static)) -> Result<()> {
        let cause = CauseChain(cause).to_string();
        Self::write(
            &self.directives,
            format_args!("cargo:warning={}: {}: {}", self.name, line, flatten(&cause)),
        )
    }
}
