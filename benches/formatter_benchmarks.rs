//! Criterion benchmarks for structured_log_json

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::io;
use structured_log_json::prelude::*;

fn minimal_event() -> LogEvent {
    LogEvent::new(LogLevel::Info, "Server started")
}

fn request_event() -> LogEvent {
    let mut event = LogEvent::new(LogLevel::Info, "Handled request {PathValue}")
        .with_property(
            "app",
            Structure::new()
                .with_field("name", "orders")
                .with_field("version", "1.4.0"),
        )
        .with_property("environment", "prod")
        .with_property("SourceContext", "orders::http")
        .with_property("PathValue", "/orders/7")
        .with_property("Attempts", vec![StructuredValue::from(1), StructuredValue::from(2)]);
    RequestSnapshot::new("GET", "/orders/7")
        .with_query_string("?expand=items")
        .with_headers([("X-Request-Id", "req-9"), ("User-Agent", "bench")])
        .with_client_ip("10.0.0.1")
        .apply_to(&mut event);
    ResponseSnapshot::new(12, 200).apply_to(&mut event);
    event
}

fn error_event(depth: usize) -> LogEvent {
    let mut error = ErrorInfo::new("LeafError", "leaf");
    for level in 0..depth {
        error = ErrorInfo::new("WrapError", format!("wrap {}", level))
            .with_stack("at orders::handler")
            .with_inner(error);
    }
    LogEvent::new(LogLevel::Error, "Request failed").with_error(error)
}

// ============================================================================
// JSON Line Benchmarks
// ============================================================================

fn bench_format_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_line");
    group.throughput(Throughput::Elements(1));

    let formatter = JsonFormatter::new();
    let minimal = minimal_event();
    let request = request_event();
    let errors = error_event(5);

    group.bench_function("minimal", |b| {
        b.iter(|| black_box(formatter.format_line(black_box(&minimal))))
    });

    group.bench_function("request", |b| {
        b.iter(|| black_box(formatter.format_line(black_box(&request))))
    });

    group.bench_function("error_chain_5", |b| {
        b.iter(|| black_box(formatter.format_line(black_box(&errors))))
    });

    group.finish();
}

// ============================================================================
// Logger Benchmarks
// ============================================================================

fn bench_logger(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger");
    group.throughput(Throughput::Elements(1));

    let json = Logger::builder().writer(io::sink()).build();
    group.bench_function("json_to_sink", |b| {
        b.iter(|| json.log(black_box(request_event())))
    });

    let text = Logger::builder()
        .output_format(OutputFormat::Text)
        .colors(false)
        .writer(io::sink())
        .build();
    group.bench_function("text_to_sink", |b| {
        b.iter(|| text.log(black_box(request_event())))
    });

    let filtered = Logger::builder()
        .min_level(LogLevel::Error)
        .writer(io::sink())
        .build();
    group.bench_function("filtered", |b| {
        b.iter(|| filtered.log(black_box(minimal_event())))
    });

    group.finish();
}

criterion_group!(benches, bench_format_line, bench_logger);
criterion_main!(benches);
