//! Basic serializer and logger usage
//!
//! Formats a few events directly, then logs through a configured logger.
//!
//! Run with: cargo run --example basic_usage

use std::io;
use structured_log_json::enrichers::standard_enrichers;
use structured_log_json::info;
use structured_log_json::prelude::*;

fn main() -> Result<()> {
    println!("=== Structured Log JSON - Basic Usage Example ===\n");

    let formatter = JsonFormatter::new();

    println!("1. Minimal event:");
    let event = LogEvent::new(LogLevel::Info, "Server started");
    print!("{}", formatter.format_line(&event)?);

    println!("\n2. Event with request, response and custom properties:");
    let mut event = LogEvent::new(LogLevel::Info, "Handled request {PathValue}")
        .with_property("SourceContext", "orders::http")
        .with_property("PathValue", "/orders/7");
    RequestSnapshot::new("GET", "/orders/7")
        .with_query_string("?expand=items")
        .with_headers([("X-Request-Id", "abc-123"), ("Cookie", "dropped")])
        .with_client_ip("10.0.0.1")
        .apply_to(&mut event);
    ResponseSnapshot::new(12, 200).apply_to(&mut event);
    print!("{}", formatter.format_line(&event)?);

    println!("\n3. Error chain:");
    let io_error = io::Error::new(io::ErrorKind::ConnectionRefused, "database unreachable");
    let wrapped = LoggerError::io_operation("loading orders", "query failed", io_error);
    let event = LogEvent::new(LogLevel::Error, "Request failed")
        .with_error(ErrorInfo::from_error(&wrapped));
    print!("{}", formatter.format_line(&event)?);

    println!("\n4. Logger configured from the environment:");
    let config = LoggerConfig::from_env().with_log_format(OutputFormat::Json);
    let mut builder = config.builder().writer(io::stdout());
    for enricher in standard_enrichers(structured_log_json::info::process_env, Some("0.1.0")) {
        builder = builder.boxed_enricher(enricher);
    }
    let logger = builder.build();
    info!(logger, "Processed {Count} orders", "Count" => 42);
    logger.debug("Hidden unless LOG_LEVEL=debug");
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
