//! The value logger: a cloneable handle over a [`Sink`] with bound
//! fields, a level filter, and severity-driven post-write actions.

use std::panic::Location;
use std::process;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::field::Field;
use crate::level::{AtomicLevel, Level};
use crate::sink::{Entry, NopSink, Sink};

/// Minimum-level filter, either baked in at build time or read through
/// a shared [`AtomicLevel`] on every check.
#[derive(Debug, Clone)]
pub(crate) enum LevelFilter {
    Fixed(Level),
    Dynamic(AtomicLevel),
}

impl LevelFilter {
    fn enabled(&self, level: Level) -> bool {
        match self {
            LevelFilter::Fixed(min) => level.enabled_by(*min),
            LevelFilter::Dynamic(handle) => handle.enabled(level),
        }
    }
}

/// What happens after a checked entry is written.
///
/// The default is chosen by severity: `Fatal` exits the process,
/// `Panic` unwinds, `DPanic` unwinds only for development loggers.
/// Tests override the action with [`CheckedEntry::should`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckWriteAction {
    Noop,
    Panic,
    Fatal,
}

/// Derivation options for [`Logger::with_options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    caller: Option<bool>,
    on_fatal: Option<CheckWriteAction>,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    /// Enables or disables caller-location capture.
    pub fn caller(mut self, capture: bool) -> Options {
        self.caller = Some(capture);
        self
    }

    /// Overrides the post-write action for fatal-severity entries.
    pub fn on_fatal(mut self, action: CheckWriteAction) -> Options {
        self.on_fatal = Some(action);
        self
    }
}

/// An opaque handle to the logging backend.
///
/// Cloning is cheap and clones share the sink. Derivation
/// (`with_fields`, `with_options`) never mutates the receiver, so a
/// logger shared across contexts and tasks stays stable.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    fields: Vec<Field>,
    filter: LevelFilter,
    capture_caller: bool,
    development: bool,
    on_fatal: Option<CheckWriteAction>,
}

impl Logger {
    /// Builds a logger over `sink` with a fixed minimum level.
    pub fn new(sink: Arc<dyn Sink>, level: Level) -> Logger {
        Logger {
            sink,
            fields: Vec::new(),
            filter: LevelFilter::Fixed(level),
            capture_caller: false,
            development: false,
            on_fatal: None,
        }
    }

    /// Builds a logger whose level checks read through `handle`, so
    /// the minimum level can change at runtime.
    pub fn with_atomic_level(sink: Arc<dyn Sink>, handle: AtomicLevel) -> Logger {
        Logger {
            filter: LevelFilter::Dynamic(handle),
            ..Logger::new(sink, Level::Info)
        }
    }

    /// A logger that discards everything.
    pub fn nop() -> Logger {
        Logger::new(Arc::new(NopSink), Level::Fatal)
    }

    /// Marks this logger as a development logger: `dpanic` entries
    /// panic after writing, the way they do in production backends'
    /// development modes.
    pub fn development(mut self, development: bool) -> Logger {
        self.development = development;
        self
    }

    /// Enables caller-location capture on emitted entries.
    pub fn capture_caller(mut self, capture: bool) -> Logger {
        self.capture_caller = capture;
        self
    }

    /// Whether an entry at `level` would pass the level filter.
    pub fn enabled(&self, level: Level) -> bool {
        self.filter.enabled(level)
    }

    /// Fields bound onto this logger, in binding order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns a derived logger with `fields` appended after the
    /// receiver's bound fields. An empty slice returns a plain clone.
    pub fn with_fields(&self, fields: &[Field]) -> Logger {
        if fields.is_empty() {
            return self.clone();
        }
        let mut derived = self.clone();
        derived.fields.extend_from_slice(fields);
        derived
    }

    /// Returns a derived logger with `opts` applied.
    pub fn with_options(&self, opts: Options) -> Logger {
        let mut derived = self.clone();
        if let Some(capture) = opts.caller {
            derived.capture_caller = capture;
        }
        if let Some(action) = opts.on_fatal {
            derived.on_fatal = Some(action);
        }
        derived
    }

    /// Checks whether an entry should be emitted, returning a pending
    /// entry when it should.
    ///
    /// Panic- and fatal-severity checks always return a pending entry:
    /// even when the level filter suppresses the write itself, the
    /// termination contract of those severities must still hold.
    #[track_caller]
    pub fn check(&self, level: Level, message: &str) -> Option<CheckedEntry> {
        let action = self.post_write_action(level);
        let emit = self.filter.enabled(level) && self.sink.enabled(level);
        if !emit && action == CheckWriteAction::Noop {
            return None;
        }

        let mut entry = Entry::new(level, message);
        if self.capture_caller {
            entry.caller = Some(Location::caller());
        }
        Some(CheckedEntry {
            sink: Arc::clone(&self.sink),
            entry,
            fields: self.fields.clone(),
            emit,
            action,
        })
    }

    /// Logs `message` at `level` with `fields` appended after the
    /// logger's bound fields.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if let Some(checked) = self.check(level, message) {
            checked.write(fields);
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// Logs at dpanic severity; panics after writing when the logger
    /// is in development mode.
    #[track_caller]
    pub fn dpanic(&self, message: &str, fields: &[Field]) {
        self.log(Level::DPanic, message, fields);
    }

    /// Logs at panic severity, then panics with the message.
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &[Field]) {
        self.log(Level::Panic, message, fields);
    }

    /// Logs at fatal severity, then exits the process.
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) {
        self.log(Level::Fatal, message, fields);
    }

    fn post_write_action(&self, level: Level) -> CheckWriteAction {
        match level {
            Level::Fatal => self.on_fatal.unwrap_or(CheckWriteAction::Fatal),
            Level::Panic => CheckWriteAction::Panic,
            Level::DPanic if self.development => CheckWriteAction::Panic,
            _ => CheckWriteAction::Noop,
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("fields", &self.fields)
            .field("filter", &self.filter)
            .field("capture_caller", &self.capture_caller)
            .field("development", &self.development)
            .finish_non_exhaustive()
    }
}

/// A log entry that passed [`Logger::check`] but has not been written.
#[must_use = "a checked entry does nothing until write() is called"]
pub struct CheckedEntry {
    sink: Arc<dyn Sink>,
    entry: Entry,
    fields: Vec<Field>,
    emit: bool,
    action: CheckWriteAction,
}

impl CheckedEntry {
    /// Overrides the post-write action. Primarily for tests that need
    /// fatal- or panic-severity writes without terminating.
    pub fn should(mut self, action: CheckWriteAction) -> CheckedEntry {
        self.action = action;
        self
    }

    pub fn level(&self) -> Level {
        self.entry.level
    }

    pub fn message(&self) -> &str {
        &self.entry.message
    }

    /// Writes the entry with `fields` appended after the bound fields,
    /// then dispatches the post-write action.
    ///
    /// Sink I/O errors are swallowed: a log call never fails its
    /// caller.
    pub fn write(mut self, fields: &[Field]) {
        self.fields.extend_from_slice(fields);
        if self.emit {
            let _ = self.sink.write(&self.entry, &self.fields);
        }
        match self.action {
            CheckWriteAction::Noop => {}
            CheckWriteAction::Panic => panic!("{}", self.entry.message),
            CheckWriteAction::Fatal => process::exit(1),
        }
    }
}

lazy_static! {
    static ref GLOBAL_LOGGER: RwLock<Logger> = RwLock::new(Logger::nop());
}

/// Returns the process-wide default logger. Starts as a nop logger.
pub fn global() -> Logger {
    GLOBAL_LOGGER.read().clone()
}

/// Replaces the process-wide default logger, returning the previous
/// one so callers can restore it.
pub fn set_global(logger: Logger) -> Logger {
    std::mem::replace(&mut *GLOBAL_LOGGER.write(), logger)
}
