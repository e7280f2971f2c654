//! Stack-traced errors example
//!
//! Builds errors that remember where they were raised and logs them with a
//! JSON `stack` field, including several joined errors.
//!
//! Run with: cargo run --example traced_errors

use rust_log_bridge::prelude::*;
use rust_log_bridge::stack::BoxError;
use rust_log_bridge::traced_error;

fn load_config(path: &str) -> std::result::Result<String, TracedError> {
    Err(traced_error!("config file {} not found", path))
}

fn connect(host: &str) -> std::result::Result<(), TracedError> {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, host.to_string());
    Err(TracedError::wrap(io))
}

fn main() -> Result<()> {
    let logger = Logger::builder()
        .min_level(LogLevel::Info)
        .appender(JsonAppender::stderr().pretty())
        .build();

    if let Err(err) = load_config("/etc/app.toml") {
        println!("Stack captured at construction:\n{}", err.stack().render());
        logger
            .error_event()
            .stack()
            .err(&err)
            .msg("startup failed");
    }

    let failures: Vec<BoxError> = vec![
        Box::new(connect("db-1").unwrap_err()),
        Box::new(std::io::Error::new(std::io::ErrorKind::TimedOut, "db-2")),
        Box::new(connect("db-3").unwrap_err()),
    ];
    if let Some(joined) = JoinedError::join(failures) {
        logger
            .error_event()
            .stack()
            .err(&joined)
            .field("replicas", 3)
            .msg("no database replica reachable");
    }

    logger.flush()
}
