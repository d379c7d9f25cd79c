//! Uniqueness-key derivation engine for background job submissions.
//!
//! Given a [`JobSubmission`] and the handler's uniqueness options merged over
//! the global defaults, the engine deterministically computes the digest an
//! external uniqueness store keys deduplication on. It performs no locking,
//! storage, or scheduling itself.
//!
//! # Architecture
//!
//! - [`JobSubmission`] - The record being enqueued; the engine fills its
//!   `unique_prefix`, `unique_args`, and `unique_digest` fields in place
//! - [`policy`] - Merges handler overrides over the global config
//! - [`filter`] - Reduces arguments to the subset that counts toward uniqueness
//! - [`normalizer`] - Canonicalizes argument values before filtering/hashing
//! - [`UniqueDigest`] - Drives the above and produces `"{prefix}:{md5_hex}"`
//!
//! # Example
//!
//! ```rust
//! use uniquejobs_config::UniquenessConfig;
//! use uniquejobs_digest::{JobSubmission, UniqueDigest};
//! use uniquejobs_registry::HandlerRegistry;
//! use serde_json::json;
//!
//! let config = UniquenessConfig::default();
//! let registry = HandlerRegistry::new();
//! let engine = UniqueDigest::new(&config, &registry);
//!
//! let mut job = JobSubmission::new("ReportJob", "low", vec![json!({"id": 7})]);
//! let digest = engine.digest(&mut job).unwrap();
//! assert!(digest.starts_with("uniquejobs:"));
//! ```

mod digest;
mod error;
pub mod filter;
pub mod keys;
pub mod normalizer;
pub mod policy;
mod types;

pub use digest::UniqueDigest;
pub use error::DigestError;
pub use filter::FilterOutcome;
pub use policy::EffectivePolicy;
pub use types::JobSubmission;
