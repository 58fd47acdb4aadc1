//! Environment-driven configuration resolution and the logger factory.
//!
//! Configuration is read from `<PREFIX>LOG_*` environment variables,
//! where the prefix is derived from the process name (see
//! [`env_prefix`]). Resolution is pure over injectable lookups so it
//! is testable without touching real process state.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::encode::{Encoding, WriterSink};
use crate::level::{AtomicLevel, Level};
use crate::logger::Logger;

/// Error building a logger. Construction failures are returned, never
/// panicked and never silently papered over.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot open log output {path:?}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the built-in sink writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

/// Logging configuration resolved from the environment.
///
/// `development` selects console-friendly defaults and makes `dpanic`
/// escalate; `json` and `verbose` can override the mode-derived
/// encoding and diagnostics independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvConfig {
    pub level: Level,
    pub development: bool,
    pub json: bool,
    pub verbose: bool,
}

/// Derives the environment-variable prefix for `procname`.
///
/// An empty `procname` falls back to the process invocation name. The
/// base filename is taken, one trailing extension is stripped, every
/// character is uppercased, and anything outside `A-Z`, `0-9`, `_` is
/// deleted outright (survivors concatenate). A trailing `_` separator
/// is appended unless nothing survived, in which case the prefix is
/// empty.
pub fn env_prefix(procname: &str) -> String {
    env_prefix_from(procname, &invocation_name)
}

fn invocation_name() -> String {
    std::env::args().next().unwrap_or_default()
}

fn env_prefix_from(procname: &str, arg0: &dyn Fn() -> String) -> String {
    let name = if procname.is_empty() {
        arg0()
    } else {
        procname.to_string()
    };

    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    // Strip one trailing extension, from the last dot.
    let stem = match base.rfind('.') {
        Some(i) => &base[..i],
        None => base,
    };

    let mut prefix: String = stem
        .chars()
        .flat_map(char::to_uppercase)
        .filter(|c| matches!(c, 'A'..='Z' | '0'..='9' | '_'))
        .collect();
    if prefix.is_empty() {
        return prefix;
    }
    prefix.push('_');
    prefix
}

impl EnvConfig {
    /// Resolves logging configuration for `procname` from the real
    /// process environment.
    ///
    /// `<PREFIX>LOG_MODE=dev` (case-insensitive) selects development
    /// mode. `<PREFIX>LOG_LEVEL` names the minimum severity; unset or
    /// unparsable text falls back silently to debug in development and
    /// info in production. `<PREFIX>LOG_JSON` and `<PREFIX>LOG_DEBUG`
    /// override the encoding and verbose diagnostics independently of
    /// the mode.
    pub fn resolve(procname: &str) -> EnvConfig {
        EnvConfig::resolve_from(procname, &|key| std::env::var(key).ok(), &invocation_name)
    }

    fn resolve_from(
        procname: &str,
        getenv: &dyn Fn(&str) -> Option<String>,
        arg0: &dyn Fn() -> String,
    ) -> EnvConfig {
        let prefix = env_prefix_from(procname, arg0);
        let lookup = |suffix: &str| getenv(&format!("{prefix}{suffix}"));

        let development = lookup("LOG_MODE")
            .is_some_and(|mode| mode.eq_ignore_ascii_case("dev"));

        let fallback = if development { Level::Debug } else { Level::Info };
        let level = lookup("LOG_LEVEL")
            .and_then(|text| text.parse().ok())
            .unwrap_or(fallback);

        // Bad boolean text falls back to the mode default, silently.
        let json = lookup("LOG_JSON")
            .and_then(|text| parse_bool(&text))
            .unwrap_or(!development);
        let verbose = lookup("LOG_DEBUG")
            .and_then(|text| parse_bool(&text))
            .unwrap_or(development);

        EnvConfig {
            level,
            development,
            json,
            verbose,
        }
    }
}

/// Accepts the classic bool spellings: `1`, `t`, `true`, `0`, `f`,
/// `false`, any case.
fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Factory configuration for the built-in writer-backed logger.
#[derive(Debug, Clone)]
pub struct Config {
    pub level: Level,
    pub development: bool,
    pub json: bool,
    pub verbose: bool,
    pub output: Output,
}

impl Config {
    /// Production defaults: JSON encoding, caller capture off.
    pub fn production(level: Level) -> Config {
        Config {
            level,
            development: false,
            json: true,
            verbose: false,
            output: Output::Stderr,
        }
    }

    /// Development defaults: console encoding, caller capture on,
    /// `dpanic` escalates.
    pub fn development(level: Level) -> Config {
        Config {
            level,
            development: true,
            json: false,
            verbose: true,
            output: Output::Stderr,
        }
    }

    /// Builds a logger with the level baked in at build time.
    pub fn build(&self) -> Result<Logger, BuildError> {
        let sink = self.sink()?;
        Ok(self.finish(Logger::new(sink, self.level)))
    }

    /// Builds a logger that reads level checks through `handle`, so
    /// later [`AtomicLevel::set_level`] calls take effect without
    /// rebuilding. The handle's current level is left untouched.
    pub fn build_with_level(&self, handle: AtomicLevel) -> Result<Logger, BuildError> {
        let sink = self.sink()?;
        Ok(self.finish(Logger::with_atomic_level(sink, handle)))
    }

    fn sink(&self) -> Result<Arc<WriterSink>, BuildError> {
        let encoding = if self.json {
            Encoding::Json
        } else {
            Encoding::Console
        };
        let out: Box<dyn io::Write + Send> = match &self.output {
            Output::Stderr => Box::new(io::stderr()),
            Output::Stdout => Box::new(io::stdout()),
            Output::File(path) => {
                let file = File::options()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| BuildError::Output {
                        path: path.clone(),
                        source,
                    })?;
                Box::new(file)
            }
        };
        Ok(Arc::new(WriterSink::new(out, encoding)))
    }

    fn finish(&self, logger: Logger) -> Logger {
        logger
            .development(self.development)
            .capture_caller(self.verbose)
    }
}

impl From<EnvConfig> for Config {
    fn from(env: EnvConfig) -> Config {
        Config {
            level: env.level,
            development: env.development,
            json: env.json,
            verbose: env.verbose,
            output: Output::Stderr,
        }
    }
}

/// Builds a logger from the environment configuration for `procname`.
///
/// When an [`AtomicLevel`] handle is supplied, the resolved level is
/// stored into it and the logger reads level checks through it from
/// then on; without one the level is fixed at build time.
pub fn new_from_env(procname: &str, level: Option<AtomicLevel>) -> Result<Logger, BuildError> {
    let env = EnvConfig::resolve(procname);
    let config = Config::from(env);
    match level {
        Some(handle) => {
            handle.set_level(env.level);
            config.build_with_level(handle)
        }
        None => config.build(),
    }
}
