//! Adapter exposing a minimal print-style logging surface, for code
//! written against legacy `Print`/`Printf`/`Println` interfaces.
//! `print` logs at info severity, `fatal*` at fatal, `panic*` at
//! panic.

use std::fmt;

use crate::context::Context;
use crate::field::Field;
use crate::level::Level;
use crate::logger::{Logger, Options};

/// A print-style wrapper around a [`Logger`].
#[derive(Debug, Clone)]
pub struct StdLogger {
    logger: Logger,
}

fn trim_newline(message: String) -> String {
    match message.strip_suffix('\n') {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}

impl StdLogger {
    /// Wraps `logger`, propagating absence: no logger in, no adapter
    /// out.
    pub fn new(logger: Option<Logger>) -> Option<StdLogger> {
        logger.map(|logger| StdLogger { logger })
    }

    /// Wraps the logger resolved from `ctx`: the bound one or the
    /// process-wide default. Generator output is baked into the
    /// adapter at this point; generators do not rerun per print call.
    pub fn from_context(ctx: &Context) -> StdLogger {
        StdLogger {
            logger: ctx.logger(),
        }
    }

    /// Returns a copy of this adapter with additional bound fields.
    pub fn with_fields(&self, fields: &[Field]) -> StdLogger {
        StdLogger {
            logger: self.logger.with_fields(fields),
        }
    }

    /// Returns a copy of this adapter with logger options applied.
    pub fn with_options(&self, opts: Options) -> StdLogger {
        StdLogger {
            logger: self.logger.with_options(opts),
        }
    }

    /// Writes an info-level log message.
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.logger.log(Level::Info, &message.to_string(), &[]);
    }

    /// Writes an info-level log message, trimming one trailing
    /// newline.
    #[track_caller]
    pub fn println(&self, message: impl fmt::Display) {
        self.logger
            .log(Level::Info, &trim_newline(message.to_string()), &[]);
    }

    /// Writes an info-level formatted log message; pair with
    /// `format_args!`.
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(Level::Info, &args.to_string(), &[]);
    }

    /// Writes a fatal-level log message, then exits the process.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.logger.log(Level::Fatal, &message.to_string(), &[]);
    }

    /// Writes a fatal-level log message, trimming one trailing
    /// newline, then exits the process.
    #[track_caller]
    pub fn fatalln(&self, message: impl fmt::Display) {
        self.logger
            .log(Level::Fatal, &trim_newline(message.to_string()), &[]);
    }

    /// Writes a fatal-level formatted log message, then exits the
    /// process.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(Level::Fatal, &args.to_string(), &[]);
    }

    /// Writes a panic-level log message, then panics.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) {
        self.logger.log(Level::Panic, &message.to_string(), &[]);
    }

    /// Writes a panic-level log message, trimming one trailing
    /// newline, then panics.
    #[track_caller]
    pub fn panicln(&self, message: impl fmt::Display) {
        self.logger
            .log(Level::Panic, &trim_newline(message.to_string()), &[]);
    }

    /// Writes a panic-level formatted log message, then panics.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.logger.log(Level::Panic, &args.to_string(), &[]);
    }
}
