//! The backend capability interface consumed by loggers.
//!
//! A [`Sink`] is the only thing the rest of the crate knows about the
//! underlying logging backend: a level filter and a write call. Tests
//! substitute in-memory sinks; production code uses the writer sink in
//! [`crate::encode`].

use std::io;
use std::panic::Location;

use chrono::{DateTime, Utc};

use crate::field::Field;
use crate::level::Level;

/// A log entry, fully described except for its fields.
///
/// Fields travel separately so a sink sees the logger's bound fields
/// and the call-site fields as one ordered slice without the logger
/// re-allocating per call.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub time: DateTime<Utc>,
    /// Call site, when the logger was built with caller capture.
    pub caller: Option<&'static Location<'static>>,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Entry {
        Entry {
            level,
            message: message.into(),
            time: Utc::now(),
            caller: None,
        }
    }
}

/// Minimal capability interface to a logging backend.
pub trait Sink: Send + Sync {
    /// Whether the backend wants entries at this severity at all.
    /// The logger applies its own level filter first; this exists so
    /// composed sinks can filter further.
    fn enabled(&self, level: Level) -> bool;

    /// Writes one entry with its ordered fields.
    fn write(&self, entry: &Entry, fields: &[Field]) -> io::Result<()>;
}

/// A sink that discards everything. Backs the default global logger
/// until the process installs a real one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopSink;

impl Sink for NopSink {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn write(&self, _entry: &Entry, _fields: &[Field]) -> io::Result<()> {
        Ok(())
    }
}
