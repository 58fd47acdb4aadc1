//! Log severity levels and the shared atomic level handle.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Log severity, ordered from least to most severe.
///
/// `DPanic` sits between `Error` and `Panic`: it logs at error
/// severity in production and escalates to a panic in development
/// builds of the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    Info = 0,
    Warn = 1,
    Error = 2,
    DPanic = 3,
    Panic = 4,
    Fatal = 5,
}

impl Level {
    /// Canonical lowercase name, as accepted by [`Level::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }

    /// Whether this severity passes a minimum-level filter.
    pub fn enabled_by(&self, min: Level) -> bool {
        *self >= min
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when level text does not name a known severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized log level {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses the canonical severity names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "dpanic" => Ok(Level::DPanic),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Cloneable, process-wide handle to a mutable minimum log level.
///
/// Loggers built against an `AtomicLevel` read every level check
/// through it, so [`AtomicLevel::set_level`] takes effect without
/// rebuilding the logger. Clones share the same underlying level.
#[derive(Debug, Clone)]
pub struct AtomicLevel(Arc<AtomicI8>);

impl AtomicLevel {
    pub fn new(level: Level) -> Self {
        AtomicLevel(Arc::new(AtomicI8::new(level as i8)))
    }

    pub fn level(&self) -> Level {
        // Values only ever come from `set_level`, so the decode is total.
        match self.0.load(Ordering::Relaxed) {
            -1 => Level::Debug,
            0 => Level::Info,
            1 => Level::Warn,
            2 => Level::Error,
            3 => Level::DPanic,
            4 => Level::Panic,
            _ => Level::Fatal,
        }
    }

    pub fn set_level(&self, level: Level) {
        self.0.store(level as i8, Ordering::Relaxed);
    }

    pub fn enabled(&self, level: Level) -> bool {
        level.enabled_by(self.level())
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        AtomicLevel::new(Level::Info)
    }
}
