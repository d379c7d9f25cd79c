//! Digest engine errors.

use thiserror::Error;
use uniquejobs_registry::FilterError;

/// Errors that may surface while deriving a digest.
///
/// Recovered conditions (missing filter method, unresolvable handler class)
/// are not errors; they show up as [`crate::FilterOutcome`] variants and log
/// events instead.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("failed to encode digestable payload: {0}")]
    Encode(#[from] serde_json::Error),
}
