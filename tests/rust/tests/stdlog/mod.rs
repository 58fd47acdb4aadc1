//! Print-style adapter tests.

use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;

use ctxlog::{CheckWriteAction, Context, Field, FieldGenerator, Level, Options, StdLogger};
use tests::capture_logger;

#[test]
fn print_family_logs_at_info() {
    let (logger, sink) = capture_logger();
    let adapter = StdLogger::new(Some(logger)).expect("logger supplied");

    adapter.print("plain");
    adapter.println("lined\n");
    adapter.printf(format_args!("formatted {}", 7));

    let entries = sink.entries();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.level == Level::Info));
    assert_eq!(entries[0].message, "plain");
    assert_eq!(entries[1].message, "lined");
    assert_eq!(entries[2].message, "formatted 7");
}

#[test]
fn from_context_carries_the_contextual_logger_and_fields() {
    let (logger, sink) = capture_logger();
    let ctx = Context::background()
        .with_logger(logger)
        .with_generators(&[FieldGenerator::new(|_| {
            vec![Field::string("request_id", "abc123")]
        })]);

    let adapter = StdLogger::from_context(&ctx);
    adapter.printf(format_args!("handled {}", 3));

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Info);
    assert_eq!(entries[0].message, "handled 3");
    assert_eq!(
        entries[0].fields,
        vec![Field::string("request_id", "abc123")]
    );
}

#[test]
fn with_fields_derives_without_mutating() {
    let (logger, sink) = capture_logger();
    let base = StdLogger::new(Some(logger)).expect("logger supplied");
    let derived = base.with_fields(&[Field::string("component", "std")]);

    base.print("bare");
    derived.print("tagged");

    let entries = sink.entries();
    assert!(entries[0].fields.is_empty());
    assert_eq!(
        entries[1].fields,
        vec![Field::string("component", "std")]
    );
}

#[test]
fn panic_family_logs_then_panics() {
    let (logger, sink) = capture_logger();
    let adapter = StdLogger::new(Some(logger)).expect("logger supplied");

    let result = catch_unwind(AssertUnwindSafe(|| adapter.panicf(format_args!("boom {}", 1))));
    assert!(result.is_err());

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Panic);
    assert_eq!(entries[0].message, "boom 1");
}

#[test]
fn fatal_family_respects_on_fatal_override() {
    let (logger, sink) = capture_logger();
    let adapter = StdLogger::new(Some(logger))
        .expect("logger supplied")
        .with_options(Options::new().on_fatal(CheckWriteAction::Noop));

    // With the action overridden the entry is written and the process
    // survives, which is the only way to cover the fatal path in-test.
    adapter.fatalln("going down\n");

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Fatal);
    assert_eq!(entries[0].message, "going down");
}
