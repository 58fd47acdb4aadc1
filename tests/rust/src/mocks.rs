//! Mock sink implementations for testing
//!
//! In-memory capture of everything a logger writes, so tests can
//! assert on emitted entries without touching real outputs.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use ctxlog::{Entry, Field, Level, Logger, Sink};

/// One captured write: the entry plus its ordered fields.
#[derive(Debug, Clone)]
pub struct CapturedEntry {
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
}

impl CapturedEntry {
    /// The value of the first field with `key`, if present.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Field keys in emission order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }
}

/// A [`Sink`] that records every write in memory.
#[derive(Default)]
pub struct CaptureSink {
    entries: Mutex<Vec<CapturedEntry>>,
}

impl CaptureSink {
    pub fn new() -> Arc<CaptureSink> {
        Arc::new(CaptureSink::default())
    }

    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Captured entries carrying exactly this message.
    pub fn with_message(&self, message: &str) -> Vec<CapturedEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }
}

impl Sink for CaptureSink {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> io::Result<()> {
        self.entries.lock().push(CapturedEntry {
            level: entry.level,
            message: entry.message.clone(),
            fields: fields.to_vec(),
        });
        Ok(())
    }
}

/// A logger over a fresh capture sink, debug level, plus the sink for
/// assertions.
pub fn capture_logger() -> (Logger, Arc<CaptureSink>) {
    let sink = CaptureSink::new();
    (Logger::new(sink.clone(), Level::Debug), sink)
}
