//! The immutable context carrier.
//!
//! A [`Context`] is a value: deriving a child clones cheap `Arc`
//! internals and never touches the parent, so arbitrarily many tasks
//! can branch off a shared root concurrently. It carries at most one
//! logger, at most one field-generator list, and a typed value map for
//! collaborator data (span contexts and the like).

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::field::Field;
use crate::generator::{self, FieldGenerator};
use crate::logger::{self, Logger, Options};

type ValueMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Immutable, request-scoped value carrier for loggers and field
/// generators.
#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Logger>,
    generators: Option<Arc<[FieldGenerator]>>,
    values: Option<Arc<ValueMap>>,
}

impl Context {
    /// An empty root context: no logger, no generators, no values.
    /// Resolving a logger from it yields the process-wide default.
    pub fn background() -> Context {
        Context::default()
    }

    /// Returns a derived context with `logger` bound.
    pub fn with_logger(&self, logger: Logger) -> Context {
        Context {
            logger: Some(logger),
            ..self.clone()
        }
    }

    /// Returns a derived context whose logger has `fields` pre-bound.
    ///
    /// This bakes the fields (including the output of any generators
    /// attached so far) into the logger itself, which is distinct from
    /// attaching more generators. An empty slice returns the context
    /// unchanged rather than a derivation.
    pub fn with_fields(&self, fields: &[Field]) -> Context {
        if fields.is_empty() {
            return self.clone();
        }
        self.with_logger(self.logger().with_fields(fields))
    }

    /// Returns a derived context whose logger has `opts` applied.
    pub fn with_options(&self, opts: Options) -> Context {
        self.with_logger(self.logger().with_options(opts))
    }

    /// Resolves the logger for this context: the bound logger or the
    /// process-wide default, decorated with the current output of all
    /// attached generators.
    ///
    /// Generators run on every resolution, so repeated calls are not
    /// free and results must not be cached across generator changes.
    pub fn logger(&self) -> Logger {
        let base = match &self.logger {
            Some(bound) => bound.clone(),
            None => logger::global(),
        };
        let generated = generator::run_all(self);
        base.with_fields(&generated)
    }

    /// Returns a derived context whose generator list is this
    /// context's list followed by `generators`.
    ///
    /// The combined list always gets a fresh, exactly-sized backing
    /// allocation. Nothing is ever appended into storage shared with a
    /// parent, so sibling contexts deriving concurrently from the same
    /// parent can never observe each other's entries.
    pub fn with_generators(&self, generators: &[FieldGenerator]) -> Context {
        if generators.is_empty() {
            return self.clone();
        }

        let current = self.generators();
        let mut combined = Vec::with_capacity(current.len() + generators.len());
        combined.extend_from_slice(current);
        combined.extend_from_slice(generators);

        Context {
            generators: Some(Arc::from(combined)),
            ..self.clone()
        }
    }

    /// The attached generator list, in attachment order. Empty when
    /// none are bound.
    pub fn generators(&self) -> &[FieldGenerator] {
        self.generators.as_deref().unwrap_or(&[])
    }

    /// Returns a derived context carrying `value` in its typed value
    /// slot for `T`, replacing any previous `T`. Copy-on-write: the
    /// parent's map is never modified.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Context {
        let mut values: ValueMap = match &self.values {
            Some(existing) => (**existing).clone(),
            None => HashMap::new(),
        };
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Context {
            values: Some(Arc::new(values)),
            ..self.clone()
        }
    }

    /// The value of type `T` carried by this context, if any.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .as_ref()?
            .get(&TypeId::of::<T>())?
            .downcast_ref()
    }

    #[cfg(test)]
    pub(crate) fn generators_ptr(&self) -> Option<*const FieldGenerator> {
        self.generators.as_ref().map(|list| list.as_ptr())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("logger", &self.logger)
            .field("generators", &self.generators().len())
            .field("values", &self.values.as_ref().map_or(0, |v| v.len()))
            .finish()
    }
}
