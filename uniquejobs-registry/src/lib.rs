//! Handler descriptors and per-handler uniqueness options.
//!
//! The digest engine resolves each submission's handler class through a
//! [`HandlerProvider`]. A handler is either *capable* (it registered a
//! [`UniqueOptions`] mapping, and possibly named filter methods) or not; an
//! unknown class name resolves to [`Resolution::Unresolved`] rather than an
//! error, so a broken class reference can never block enqueue.
//!
//! # Example
//!
//! ```rust
//! use uniquejobs_registry::{CapableHandler, HandlerProvider, HandlerRegistry, UniqueOptions};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(
//!     "OrderJob",
//!     CapableHandler::new(UniqueOptions::new().filter_method("filtered_args"))
//!         .method("filtered_args", |args| Ok(args[..1].to_vec())),
//! );
//! registry.register_plain("Mailer");
//!
//! assert!(matches!(registry.resolve("Mailer"), uniquejobs_registry::Resolution::NotCapable));
//! ```

mod options;
mod registry;

pub use options::{FilterError, FilterFn, FilterSpec, UniqueOptions};
pub use registry::{CapableHandler, HandlerProvider, HandlerRegistry, Resolution};
