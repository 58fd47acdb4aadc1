//! # ctxlog
//!
//! Context-scoped structured logging: attach a logger and dynamic
//! field generators to a request-scoped [`Context`], pass the context
//! down the call tree, and log through per-severity entry points that
//! re-resolve the logger and enrich every entry with the generated
//! fields (trace identifiers being the typical case).
//!
//! ## Modules
//!
//! - `level` - Severity levels and the shared atomic level handle
//! - `field` - Typed (key, value) log attributes
//! - `sink` - The backend capability interface (`Sink`, `Entry`)
//! - `encode` - Built-in writer sink (JSON / console lines)
//! - `config` - Environment resolution and the logger factory
//! - `logger` - The value logger, checked entries, global default
//! - `context` - The immutable context carrier
//! - `generator` - Field-generator protocol
//! - `facade` - `debug(ctx, ...)` .. `fatal(ctx, ...)` entry points
//! - `stdlog` - Print-style legacy adapter
//!
//! ## Example
//!
//! ```no_run
//! use ctxlog::{Config, Context, Field, FieldGenerator, Level};
//!
//! let logger = Config::production(Level::Info).build()?;
//! let ctx = Context::background()
//!     .with_logger(logger)
//!     .with_generators(&[FieldGenerator::new(|_ctx| {
//!         vec![Field::string("request_id", "abc123")]
//!     })]);
//!
//! ctxlog::info(&ctx, "ready", &[Field::int("port", 8080)]);
//! # Ok::<(), ctxlog::BuildError>(())
//! ```

pub mod config;
pub mod context;
pub mod encode;
pub mod facade;
pub mod field;
pub mod generator;
pub mod level;
pub mod logger;
pub mod sink;
pub mod stdlog;

// Re-export the working surface at the crate root.
pub use config::{new_from_env, BuildError, Config, EnvConfig, Output};
pub use context::Context;
pub use encode::{Encoding, WriterSink};
pub use facade::{check, debug, dpanic, error, fatal, info, log, panic, warn};
pub use field::{Field, FieldValue};
pub use generator::{run_all, FieldGenerator};
pub use level::{AtomicLevel, Level, ParseLevelError};
pub use logger::{global, set_global, CheckWriteAction, CheckedEntry, Logger, Options};
pub use sink::{Entry, NopSink, Sink};
pub use stdlog::StdLogger;
