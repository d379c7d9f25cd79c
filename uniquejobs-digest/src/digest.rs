//! Digest computation.
//!
//! Assembles the canonical comparison structure for a submission, encodes it
//! as compact JSON, hashes it with MD5 (content addressing, not adversarial
//! collision resistance), and prefixes the hex with the resolved prefix.

use md5::{Digest, Md5};
use serde_json::{Map, Value};
use tracing::debug;
use uniquejobs_config::UniquenessConfig;
use uniquejobs_registry::HandlerProvider;

use crate::error::DigestError;
use crate::filter;
use crate::keys;
use crate::policy::{self, EffectivePolicy};
use crate::types::JobSubmission;

/// The uniqueness-key derivation engine.
///
/// Holds its dependencies explicitly; it never reads ambient state, so it is
/// safe to share across threads and trivial to test.
pub struct UniqueDigest<'a> {
    config: &'a UniquenessConfig,
    provider: &'a dyn HandlerProvider,
}

impl<'a> UniqueDigest<'a> {
    pub fn new(config: &'a UniquenessConfig, provider: &'a dyn HandlerProvider) -> Self {
        Self { config, provider }
    }

    /// Populate `unique_prefix`, `unique_args`, and `unique_digest` on the
    /// submission, each only if currently unset. Pre-seeded values are
    /// preserved verbatim and used by the later steps, so calling this twice
    /// is a no-op.
    pub fn apply(&self, job: &mut JobSubmission) -> Result<(), DigestError> {
        let resolution = self.provider.resolve(&job.class);
        let policy = policy::resolve(&resolution, self.config);

        if job.unique_prefix.is_none() {
            job.unique_prefix = Some(policy.prefix.clone());
        }

        if job.unique_args.is_none() {
            let outcome = filter::unique_args(&job.class, &resolution, &policy, &job.args)?;
            job.unique_args = Some(outcome.into_args());
        }

        if job.unique_digest.is_none() {
            job.unique_digest = Some(self.compute(job, &policy)?);
        }

        Ok(())
    }

    /// One-shot convenience: apply and return the digest string.
    pub fn digest(&self, job: &mut JobSubmission) -> Result<String, DigestError> {
        self.apply(job)?;
        // apply() always leaves unique_digest set.
        Ok(job.unique_digest.clone().unwrap_or_default())
    }

    fn compute(&self, job: &JobSubmission, policy: &EffectivePolicy) -> Result<String, DigestError> {
        let payload = digestable(job, policy);
        let encoded = serde_json::to_string(&payload)?;
        let hash = Md5::digest(encoded.as_bytes());

        let prefix = job.unique_prefix.as_deref().unwrap_or(policy.prefix.as_str());
        let digest = format!("{}:{}", prefix, hex::encode(hash));
        debug!(class = %job.class, payload = %encoded, digest = %digest, "computed unique digest");
        Ok(digest)
    }
}

/// The canonical comparison structure: `class`, `queue`, `unique_args`, in
/// that order. The keys happen to sort that way too, so the encoding is
/// byte-stable whether or not the JSON map preserves insertion order. The
/// queue is dropped when uniqueness spans all queues.
fn digestable(job: &JobSubmission, policy: &EffectivePolicy) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(keys::CLASS.to_string(), Value::String(job.class.clone()));
    if policy.all_queues {
        debug!(class = %job.class, queue = %job.queue, "uniqueness spans all queues; dropping queue from digest");
    } else {
        payload.insert(keys::QUEUE.to_string(), Value::String(job.queue.clone()));
    }
    payload.insert(
        keys::UNIQUE_ARGS.to_string(),
        Value::Array(job.unique_args.clone().unwrap_or_default()),
    );
    payload
}
