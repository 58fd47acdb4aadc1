//! Per-severity convenience entry points over the context carrier.
//!
//! Each function resolves the context's logger (generator fields
//! already folded in) and emits with the explicit fields appended.
//! `#[track_caller]` carries the real call site through, so captured
//! caller locations point at the caller of these functions rather
//! than at this module.

use crate::context::Context;
use crate::field::Field;
use crate::level::Level;
use crate::logger::CheckedEntry;

/// Checks a log at `level` against the context's logger, returning a
/// pending entry to be written (or dropped) by the caller.
#[track_caller]
pub fn check(ctx: &Context, level: Level, message: &str) -> Option<CheckedEntry> {
    ctx.logger().check(level, message)
}

/// Logs `message` at `level` through the context's logger.
#[track_caller]
pub fn log(ctx: &Context, level: Level, message: &str, fields: &[Field]) {
    ctx.logger().log(level, message, fields);
}

#[track_caller]
pub fn debug(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::Debug, message, fields);
}

#[track_caller]
pub fn info(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::Info, message, fields);
}

#[track_caller]
pub fn warn(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::Warn, message, fields);
}

#[track_caller]
pub fn error(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::Error, message, fields);
}

/// Logs at dpanic severity: an error in production, a panic after
/// writing when the context's logger is in development mode.
#[track_caller]
pub fn dpanic(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::DPanic, message, fields);
}

/// Logs at panic severity, then panics with the message.
#[track_caller]
pub fn panic(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::Panic, message, fields);
}

/// Logs at fatal severity, then exits the process.
#[track_caller]
pub fn fatal(ctx: &Context, message: &str, fields: &[Field]) {
    log(ctx, Level::Fatal, message, fields);
}
