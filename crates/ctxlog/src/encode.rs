//! Built-in writer sink with JSON and console encodings.
//!
//! This is deliberately thin glue over `serde_json` and `chrono`; all
//! real encoding policy lives in those crates. One entry becomes one
//! line on the writer.

use std::io::{self, Write};

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::field::Field;
use crate::level::Level;
use crate::sink::{Entry, Sink};

/// Output encoding for [`WriterSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// One JSON object per line: `ts`, `level`, `caller`, `msg`, then
    /// fields in order. Duplicate keys shadow earlier ones.
    Json,
    /// Human-readable line with a short fixed-width clock timestamp.
    Console,
}

/// A [`Sink`] that encodes entries onto any `Write` target.
///
/// The writer is behind a mutex so concurrent log calls interleave at
/// line granularity rather than byte granularity.
pub struct WriterSink {
    out: Mutex<Box<dyn Write + Send>>,
    encoding: Encoding,
}

impl WriterSink {
    pub fn new(out: Box<dyn Write + Send>, encoding: Encoding) -> WriterSink {
        WriterSink {
            out: Mutex::new(out),
            encoding,
        }
    }

    fn encode_json(entry: &Entry, fields: &[Field]) -> io::Result<Vec<u8>> {
        let mut map = Map::new();
        map.insert("ts".to_string(), Value::String(entry.time.to_rfc3339()));
        map.insert(
            "level".to_string(),
            Value::String(entry.level.as_str().to_string()),
        );
        if let Some(caller) = entry.caller {
            map.insert(
                "caller".to_string(),
                Value::String(format!("{}:{}", caller.file(), caller.line())),
            );
        }
        map.insert("msg".to_string(), Value::String(entry.message.clone()));
        for field in fields {
            map.insert(field.key.clone(), field.value.to_json());
        }

        let mut line = serde_json::to_vec(&Value::Object(map))?;
        line.push(b'\n');
        Ok(line)
    }

    fn encode_console(entry: &Entry, fields: &[Field]) -> Vec<u8> {
        let mut line = format!(
            "{} {:<6} ",
            entry.time.format("%H:%M:%S%.3f"),
            entry.level.as_str().to_uppercase(),
        );
        if let Some(caller) = entry.caller {
            line.push_str(&format!("{}:{} ", caller.file(), caller.line()));
        }
        line.push_str(&entry.message);
        if !fields.is_empty() {
            line.push_str(" {");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    line.push_str(", ");
                }
                line.push_str(&field.key);
                line.push('=');
                line.push_str(&field.value.to_string());
            }
            line.push('}');
        }
        line.push('\n');
        line.into_bytes()
    }
}

impl Sink for WriterSink {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> io::Result<()> {
        let line = match self.encoding {
            Encoding::Json => Self::encode_json(entry, fields)?,
            Encoding::Console => Self::encode_console(entry, fields),
        };
        let mut out = self.out.lock();
        out.write_all(&line)?;
        out.flush()
    }
}
