//! Core types for the digest engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A job submission on its way to the queue.
///
/// The caller populates `class`, `queue`, and `args`; the engine fills the
/// three `unique_*` fields in place, each at most once. Field names match the
/// wire payload the surrounding queue system serializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub class: String,
    pub queue: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_args: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_digest: Option<String>,
}

impl JobSubmission {
    #[inline]
    pub fn new(class: impl Into<String>, queue: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            class: class.into(),
            queue: queue.into(),
            args,
            unique_prefix: None,
            unique_args: None,
            unique_digest: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_skipped_on_the_wire() {
        let job = JobSubmission::new("Mailer", "default", vec![json!(1)]);
        let wire = serde_json::to_string(&job).unwrap();
        assert_eq!(wire, r#"{"class":"Mailer","queue":"default","args":[1]}"#);
    }

    #[test]
    fn round_trips_populated_fields() {
        let wire = r#"{
            "class": "Mailer",
            "queue": "default",
            "args": [1, "x"],
            "unique_digest": "uniquejobs:00000000000000000000000000000000"
        }"#;
        let job: JobSubmission = serde_json::from_str(wire).unwrap();
        assert_eq!(job.args, vec![json!(1), json!("x")]);
        assert_eq!(
            job.unique_digest.as_deref(),
            Some("uniquejobs:00000000000000000000000000000000")
        );
        assert!(job.unique_prefix.is_none());
    }
}
