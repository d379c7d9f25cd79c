//! Uniqueness options a handler class may register.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a user-supplied filter function.
///
/// A failing filter is a configuration error the enclosing system must
/// surface; the engine propagates it instead of falling back.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unique args filter failed: {0}")]
    Failed(String),
}

impl FilterError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// A filter function reducing normalized arguments to the subset that counts
/// toward uniqueness.
pub type FilterFn = Arc<dyn Fn(&[Value]) -> Result<Vec<Value>, FilterError> + Send + Sync>;

/// How (and whether) a handler filters its arguments for uniqueness.
#[derive(Clone, Default)]
pub enum FilterSpec {
    /// No filter option registered.
    #[default]
    Unset,
    /// Explicitly registered as disabled (the boolean marker form).
    Disabled,
    /// An inline callback invoked with the normalized arguments.
    Callback(FilterFn),
    /// The name of a filter method in the handler's capability map.
    Method(String),
}

impl FilterSpec {
    /// A configured filter counts as an enablement signal on its own.
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Callback(_) | Self::Method(_))
    }
}

impl fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Disabled => f.write_str("Disabled"),
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Method(name) => f.debug_tuple("Method").field(name).finish(),
        }
    }
}

/// Per-handler uniqueness overrides, merged over the global defaults when
/// the effective policy for a submission is resolved.
#[derive(Debug, Clone, Default)]
pub struct UniqueOptions {
    /// Digest prefix override; empty or absent falls back to the global one.
    pub prefix: Option<String>,
    /// Drop the queue from the digest so equivalent jobs dedupe across queues.
    pub on_all_queues: bool,
    /// Explicit argument-filtering enablement flag.
    pub args_enabled: bool,
    /// Filter specification; `Callback`/`Method` also imply enablement.
    pub filter: FilterSpec,
}

impl UniqueOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn on_all_queues(mut self) -> Self {
        self.on_all_queues = true;
        self
    }

    pub fn enable_args(mut self) -> Self {
        self.args_enabled = true;
        self
    }

    pub fn filter_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Vec<Value>, FilterError> + Send + Sync + 'static,
    {
        self.filter = FilterSpec::Callback(Arc::new(f));
        self
    }

    pub fn filter_method(mut self, name: impl Into<String>) -> Self {
        self.filter = FilterSpec::Method(name.into());
        self
    }

    pub fn disable_filter(mut self) -> Self {
        self.filter = FilterSpec::Disabled;
        self
    }
}
