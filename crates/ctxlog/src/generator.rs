//! Field generators: first-class callbacks that derive fields from a
//! context at log time (trace identifiers being the usual case).

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::context::Context;
use crate::field::Field;

/// A callback producing zero or more fields from a context.
///
/// Generators are plain cloneable function values; callers register
/// them with [`Context::with_generators`] without the core knowing
/// anything about their identity.
#[derive(Clone)]
pub struct FieldGenerator(Arc<dyn Fn(&Context) -> Vec<Field> + Send + Sync>);

impl FieldGenerator {
    pub fn new<F>(generate: F) -> FieldGenerator
    where
        F: Fn(&Context) -> Vec<Field> + Send + Sync + 'static,
    {
        FieldGenerator(Arc::new(generate))
    }

    /// Runs the generator. A panicking generator is absorbed and
    /// contributes no fields; a log call must never abort because a
    /// generator misbehaved.
    pub fn generate(&self, ctx: &Context) -> Vec<Field> {
        catch_unwind(AssertUnwindSafe(|| (self.0)(ctx))).unwrap_or_default()
    }
}

impl fmt::Debug for FieldGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldGenerator")
    }
}

/// Runs every generator attached to `ctx` in attachment order and
/// concatenates their outputs.
pub fn run_all(ctx: &Context) -> Vec<Field> {
    let mut fields = Vec::new();
    for generator in ctx.generators() {
        fields.extend(generator.generate(ctx));
    }
    fields
}
