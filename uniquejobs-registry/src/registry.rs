//! Handler registry keyed by class name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::options::{FilterError, FilterFn, UniqueOptions};

/// A handler that exposes uniqueness options, plus its named filter methods.
///
/// Named-method filters are a capability map the handler registers up front;
/// dispatch is a lookup whose miss is an `Option::None`, never a panic.
#[derive(Clone)]
pub struct CapableHandler {
    options: UniqueOptions,
    methods: HashMap<String, FilterFn>,
}

impl CapableHandler {
    pub fn new(options: UniqueOptions) -> Self {
        Self {
            options,
            methods: HashMap::new(),
        }
    }

    /// Register a named filter method.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Vec<Value>, FilterError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    pub fn options(&self) -> &UniqueOptions {
        &self.options
    }

    /// Look up a filter method by name.
    pub fn filter_method(&self, name: &str) -> Option<&FilterFn> {
        self.methods.get(name)
    }
}

impl fmt::Debug for CapableHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapableHandler")
            .field("options", &self.options)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Outcome of resolving a handler class name.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Known handler exposing uniqueness options.
    Capable(&'a CapableHandler),
    /// Known handler with no uniqueness options; global defaults apply.
    NotCapable,
    /// The class name does not correspond to a registered handler.
    Unresolved,
}

impl Resolution<'_> {
    pub fn is_capable(&self) -> bool {
        matches!(self, Self::Capable(_))
    }
}

/// Lookup seam between the digest engine and the handler universe.
///
/// Implementations must not fail for unknown class names; they answer
/// [`Resolution::Unresolved`] instead.
pub trait HandlerProvider: Send + Sync {
    fn resolve(&self, handler_class: &str) -> Resolution<'_>;
}

/// Default in-memory [`HandlerProvider`], populated once at startup.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    // None marks a registered handler without uniqueness options.
    handlers: HashMap<String, Option<CapableHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler exposing uniqueness options.
    pub fn register(&mut self, handler_class: impl Into<String>, handler: CapableHandler) {
        self.handlers.insert(handler_class.into(), Some(handler));
    }

    /// Register a handler that exposes no uniqueness options.
    pub fn register_plain(&mut self, handler_class: impl Into<String>) {
        self.handlers.insert(handler_class.into(), None);
    }

    pub fn contains(&self, handler_class: &str) -> bool {
        self.handlers.contains_key(handler_class)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerProvider for HandlerRegistry {
    fn resolve(&self, handler_class: &str) -> Resolution<'_> {
        match self.handlers.get(handler_class) {
            Some(Some(handler)) => Resolution::Capable(handler),
            Some(None) => Resolution::NotCapable,
            None => Resolution::Unresolved,
        }
    }
}
