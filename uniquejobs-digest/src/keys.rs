//! Wire key constants for the submission payload and digestable structure.

pub const CLASS: &str = "class";
pub const QUEUE: &str = "queue";
pub const ARGS: &str = "args";
pub const UNIQUE_PREFIX: &str = "unique_prefix";
pub const UNIQUE_ARGS: &str = "unique_args";
pub const UNIQUE_DIGEST: &str = "unique_digest";
