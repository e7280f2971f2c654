//! Basic bridge usage example
//!
//! Demonstrates the core logger, the facade logger bridged onto it, and
//! attribute groups.
//!
//! Run with: cargo run --example basic_usage

use rust_log_bridge::prelude::*;
use rust_log_bridge::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Bridge - Basic Usage Example ===\n");

    // Core logger writing human-readable text to stdout
    let core = Logger::builder()
        .min_level(LogLevel::Debug)
        .appender(ConsoleAppender::new())
        .timestamp(false)
        .build();
    let core = Arc::new(core);

    println!("1. Logging through the core logger:");
    core.trace("Trace message (hidden)");
    core.debug("This is a debug message");
    info!(core, "Listening on port {}", 8080);
    warn!(core, "Cache at {}% capacity", 91);

    println!("\n2. Logging through the facade:");
    let logger = FacadeLogger::bridge(Arc::clone(&core), false);
    logger.info("service started", &[Attr::new("version", "1.4.2")]);

    let requests = logger
        .with(&[Attr::new("component", "http")])
        .with_group("request");
    requests.info("request served", &[Attr::new("path", "/health"), Attr::new("status", 200)]);
    requests.debug("cache lookup", &[Attr::new("hit", true)]);

    println!("\n3. Building from configuration:");
    let config = LoggerConfig::from_env()
        .with_format(OutputFormat::Text)
        .without_color();
    println!("   Level resolved from environment: {}", config.level);
    let handler: Arc<dyn Handler> = Arc::new(config.build_handler());
    let configured = FacadeLogger::new(handler);
    configured.warn("configured from environment", &[]);

    core.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
