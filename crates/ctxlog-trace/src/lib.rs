//! # ctxlog-trace
//!
//! Correlates log entries with distributed-tracing records: carries a
//! [`SpanContext`] on a ctxlog [`Context`] and provides a field
//! generator that stamps `trace_id` and `span_id` onto every entry.
//!
//! Field convention: full identifiers rendered as lowercase hex
//! strings under the generic names `trace_id` and `span_id`. Vendor
//! encodings (truncated 64-bit integers under vendor field names) are
//! deliberately not provided; one convention keeps log pipelines
//! consistent.

use std::fmt;

use ctxlog::{Context, Field, FieldGenerator};

/// 128-bit trace identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(pub [u8; 16]);

/// 64-bit span identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(pub [u8; 8]);

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// The trace/span identifier pair for the current unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanContext {
    pub trace_id: TraceId,
    pub span_id: SpanId,
}

/// Returns a derived context carrying `span` for
/// [`trace_field_generator`] (and anything else) to read.
pub fn with_span_context(ctx: &Context, span: SpanContext) -> Context {
    ctx.with_value(span)
}

/// The span context carried by `ctx`, if any.
pub fn span_context_of(ctx: &Context) -> Option<SpanContext> {
    ctx.value::<SpanContext>().copied()
}

/// A field generator emitting `trace_id` and `span_id` hex fields for
/// the context's span. A context without a span contributes no fields.
pub fn trace_field_generator() -> FieldGenerator {
    FieldGenerator::new(|ctx| match span_context_of(ctx) {
        Some(span) => vec![
            Field::string("trace_id", span.trace_id.to_string()),
            Field::string("span_id", span.span_id.to_string()),
        ],
        None => Vec::new(),
    })
}
