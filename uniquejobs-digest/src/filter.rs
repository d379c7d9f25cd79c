//! Argument filtering.
//!
//! Reduces a submission's arguments to the subset that counts toward
//! uniqueness, according to the effective policy. Every fallback here is
//! fail-open: a misconfigured filter or an unresolvable handler class must
//! never block enqueue, so those paths surface through the returned variant
//! and a log event rather than an error. Only an error returned by an
//! invoked filter function propagates.

use serde_json::Value;
use tracing::{debug, warn};
use uniquejobs_registry::{FilterError, FilterSpec, Resolution};

use crate::normalizer;
use crate::policy::EffectivePolicy;

/// How the unique arguments were produced.
///
/// The fallback paths are part of the signature so callers (and tests) can
/// tell a successful filter from a recovery without reading logs.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Argument filtering is disabled by policy; raw args count as-is.
    Disabled(Vec<Value>),
    /// Normalized (and possibly filtered) arguments.
    Filtered(Vec<Value>),
    /// The handler class could not be resolved; raw args pass through.
    Fallback(Vec<Value>),
}

impl FilterOutcome {
    pub fn into_args(self) -> Vec<Value> {
        match self {
            Self::Disabled(args) | Self::Filtered(args) | Self::Fallback(args) => args,
        }
    }

    pub fn args(&self) -> &[Value] {
        match self {
            Self::Disabled(args) | Self::Filtered(args) | Self::Fallback(args) => args,
        }
    }
}

/// Compute the unique arguments for one submission.
pub fn unique_args(
    handler_class: &str,
    resolution: &Resolution<'_>,
    policy: &EffectivePolicy,
    args: &[Value],
) -> Result<FilterOutcome, FilterError> {
    if !policy.args_enabled {
        debug!(class = %handler_class, "unique args disabled; raw arguments count toward uniqueness");
        return Ok(FilterOutcome::Disabled(args.to_vec()));
    }

    // A class that resolves to nothing abandons the whole filtering step.
    if matches!(resolution, Resolution::Unresolved) {
        debug!(class = %handler_class, "handler class unresolved; passing raw arguments through");
        return Ok(FilterOutcome::Fallback(args.to_vec()));
    }

    if args.is_empty() {
        return Ok(FilterOutcome::Filtered(Vec::new()));
    }

    let normalized = normalizer::normalize_args(args);
    debug!(class = %handler_class, raw = ?args, normalized = ?normalized, "normalized arguments");

    match &policy.filter {
        FilterSpec::Unset | FilterSpec::Disabled => {
            debug!(class = %handler_class, "arguments not filtered (the combined arguments count toward uniqueness)");
            Ok(FilterOutcome::Filtered(normalized))
        }
        FilterSpec::Callback(f) => {
            let filtered = f(&normalized)?;
            debug!(class = %handler_class, before = ?normalized, after = ?filtered, "filtered arguments by callback");
            Ok(FilterOutcome::Filtered(filtered))
        }
        FilterSpec::Method(name) => filter_by_method(handler_class, resolution, name, normalized),
    }
}

fn filter_by_method(
    handler_class: &str,
    resolution: &Resolution<'_>,
    name: &str,
    normalized: Vec<Value>,
) -> Result<FilterOutcome, FilterError> {
    let method = match resolution {
        Resolution::Capable(handler) => handler.filter_method(name),
        _ => None,
    };

    match method {
        Some(f) => {
            let filtered = f(&normalized)?;
            debug!(class = %handler_class, method = %name, before = ?normalized, after = ?filtered, "filtered arguments by method");
            Ok(FilterOutcome::Filtered(filtered))
        }
        None => {
            warn!(
                class = %handler_class,
                method = %name,
                args = ?normalized,
                "filter method not registered; returning arguments unchanged"
            );
            Ok(FilterOutcome::Filtered(normalized))
        }
    }
}
