//! Environment resolution and logger-factory tests, including the
//! end-to-end encoded output of factory-built loggers.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use ctxlog::{AtomicLevel, Context, Encoding, Field, Level, Logger, WriterSink};

/// A cloneable in-memory write target for writer-sink assertions.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("output is utf-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn buffer_logger(encoding: Encoding, level: Level) -> (Logger, SharedBuf) {
    let buf = SharedBuf::default();
    let sink = Arc::new(WriterSink::new(Box::new(buf.clone()), encoding));
    (Logger::new(sink, level), buf)
}

#[test]
fn json_output_carries_context_fields_in_order() {
    let (logger, buf) = buffer_logger(Encoding::Json, Level::Debug);
    let ctx = Context::background()
        .with_logger(logger)
        .with_fields(&[Field::string("service", "api")]);

    ctxlog::info(&ctx, "ready", &[Field::int("port", 8080)]);

    let line = buf.contents();
    let value: serde_json::Value = serde_json::from_str(line.trim_end()).expect("one JSON line");
    assert_eq!(value["level"], "info");
    assert_eq!(value["msg"], "ready");
    assert_eq!(value["service"], "api");
    assert_eq!(value["port"], 8080);

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["ts", "level", "msg", "service", "port"]);
}

#[test]
fn console_output_is_one_line_per_entry() {
    let (logger, buf) = buffer_logger(Encoding::Console, Level::Debug);
    let ctx = Context::background().with_logger(logger);

    ctxlog::warn(&ctx, "first", &[Field::bool("flag", true)]);
    ctxlog::error(&ctx, "second", &[]);

    let out = buf.contents();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].ends_with("first {flag=true}"));
    assert!(lines[1].contains("ERROR"));
    assert!(lines[1].ends_with("second"));
}

#[test]
fn atomic_level_reconfigures_a_built_logger() {
    let buf = SharedBuf::default();
    let sink = Arc::new(WriterSink::new(Box::new(buf.clone()), Encoding::Json));
    let handle = AtomicLevel::new(Level::Warn);
    let logger = Logger::with_atomic_level(sink, handle.clone());
    let ctx = Context::background().with_logger(logger);

    ctxlog::info(&ctx, "suppressed", &[]);
    handle.set_level(Level::Debug);
    ctxlog::info(&ctx, "emitted", &[]);

    let out = buf.contents();
    assert!(!out.contains("suppressed"));
    assert!(out.contains("emitted"));
}

// The tests below are the only ones anywhere that touch the real
// process environment; everything else goes through the injectable
// lookups. Contract for keeping them safe under the parallel test
// runner: every test owns a prefix unique to itself (derived from a
// procname no other test uses), sets only variables under that prefix,
// and removes them before returning.

#[test]
fn resolve_reads_prefixed_process_environment() {
    std::env::set_var("CTXLOGENVSUITE_LOG_MODE", "dev");
    std::env::set_var("CTXLOGENVSUITE_LOG_LEVEL", "error");

    let config = ctxlog::EnvConfig::resolve("/usr/local/bin/ctxlog-env-suite.test");
    assert_eq!(config.level, Level::Error);
    assert!(config.development);

    std::env::remove_var("CTXLOGENVSUITE_LOG_MODE");
    std::env::remove_var("CTXLOGENVSUITE_LOG_LEVEL");
}

#[test]
fn new_from_env_feeds_the_level_handle() {
    std::env::set_var("CTXLOGFACTORY_LOG_LEVEL", "warn");

    let handle = AtomicLevel::new(Level::Debug);
    let logger = ctxlog::new_from_env("ctxlog-factory", Some(handle.clone()))
        .expect("stderr sink always builds");

    // The resolved level landed in the shared handle, and the logger
    // reads through it.
    assert_eq!(handle.level(), Level::Warn);
    assert!(!logger.enabled(Level::Info));
    handle.set_level(Level::Debug);
    assert!(logger.enabled(Level::Info));

    std::env::remove_var("CTXLOGFACTORY_LOG_LEVEL");
}

#[test]
fn new_from_env_without_handle_bakes_the_level() {
    std::env::set_var("CTXLOGBAKED_LOG_LEVEL", "error");

    let logger =
        ctxlog::new_from_env("ctxlog-baked", None).expect("stderr sink always builds");
    assert!(logger.enabled(Level::Error));
    assert!(!logger.enabled(Level::Warn));

    std::env::remove_var("CTXLOGBAKED_LOG_LEVEL");
}

#[test]
fn build_failure_is_an_error_not_a_panic() {
    let config = ctxlog::Config {
        output: ctxlog::Output::File("/nonexistent-dir/ctxlog/test.log".into()),
        ..ctxlog::Config::production(Level::Info)
    };
    let err = config.build().expect_err("unopenable output must fail");
    assert!(matches!(err, ctxlog::BuildError::Output { .. }));
}
