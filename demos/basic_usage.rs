//! Basic logger usage example
//!
//! Demonstrates the console and structured outputs, groups, and levels.
//!
//! Run with: cargo run --example basic_usage

use duallog::prelude::*;
use duallog::{info, warn};

fn main() -> Result<()> {
    println!("=== duallog - Basic Usage Example ===\n");

    // Console mode: records only appear as colorized lines
    let logger = Logger::stdout();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message", [])?;
    logger.debug("This is a debug message", [])?;
    logger.info("This is an info message", [])?;
    logger.warn("This is a warning message", [])?;
    logger.error("This is an error message", [])?;

    println!("\n2. Attributes and groups:");
    info!(logger, "connected"; "host" => "db1", "port" => 5432)?;
    let request = logger
        .with_attrs([Attr::new("service", "api")])
        .with_group("request")
        .with_attrs([Attr::new("id", "abc-123")]);
    request.info("handled", [Attr::new("status", 200)])?;
    warn!(request, "slow response: {}ms", 850)?;

    println!("\n3. Structured output to stderr, console lines to stdout:");
    let structured = Logger::builder()
        .sink(std::io::stderr())
        .min_level(LogLevel::Info)
        .build();
    structured.debug("Debug message (hidden)", [])?;
    structured.info("shipped to the backend", [Attr::new("bytes", 2048)])?;

    println!("\n4. Default logger:");
    duallog::infof(format_args!("{} + {} = {}", 2, 2, 4))?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
