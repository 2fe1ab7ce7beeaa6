//! Basic facade usage example
//!
//! Demonstrates console output, levels, multi-line messages, failure causes and
//! listeners.
//!
//! Run with: cargo run --example basic_usage

use log_front::prelude::*;
use log_front::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== log_front - Basic Usage Example ===\n");

    let listeners = Arc::new(LogListeners::new());
    let factory = LoggerFactory::builder()
        .formatter(BasicFormatter::new())
        .default_level(Level::Trace)
        .listeners(Arc::clone(&listeners))
        .build();
    let logger = factory.get_logger("demo.basic")?;

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message")?;
    logger.debug("This is a debug message")?;
    logger.info("This is an info message")?;
    logger.warn("This is a warning message")?;
    logger.error("This is an error message")?;

    println!("\n2. Changing the level - trace and debug won't show:");
    logger.set_level(Level::Info);
    logger.trace("Trace message (hidden)")?;
    logger.debug("Debug message (hidden)")?;
    info!(logger, "Info message number {}", 1)?;
    warn!(logger, "Warning message number {}", 2)?;

    println!("\n3. Multi-line text is split, control characters escaped:");
    logger.info("first line\r\nsecond\tline\nbell \u{7} and escape \u{1b}[31m")?;

    println!("\n4. Failure causes are rendered after the message:");
    let cause = LoggerError::io_operation(
        "reading configuration",
        "app.toml",
        std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
    );
    logger.error_with_cause(&cause, "Startup failed")?;

    println!("\n5. Separated console format:");
    let console = LoggerFactory::console();
    console.get_logger("demo.console")?.info("Compact output")?;

    println!("\n6. Listeners observe every event:");
    let list = Arc::new(LogList::new());
    {
        let _guard = listeners.register(list.clone());
        logger.info("Observed by the list")?;
    }
    for item in list.items() {
        println!("   listener saw {} {}: {}", item.level, item.name, item.message);
    }

    println!("\n7. Dynamic backend selection:");
    let dynamic = LoggerFactory::dynamic();
    let chosen = dynamic.get_logger("demo.dynamic")?;
    println!("   bound to backend: {}", chosen.backend_name());
    chosen.info("Hello from whichever backend is present")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
