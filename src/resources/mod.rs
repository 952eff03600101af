// src/resources/mod.rs

//! Resource preconditions for tasks.
//!
//! - [`spec`]: the pattern list a task declares (`inputs = ...`).
//! - [`kind`]: what each resolved path must be.
//! - [`expand`]: glob expansion behind the [`PatternExpander`] seam.
//! - [`validator`]: the check-and-report loop itself.

pub mod expand;
pub mod kind;
pub mod spec;
pub mod validator;

pub use expand::{FsGlobExpander, PatternExpander};
pub use kind::ResourceKind;
pub use spec::ResourceSpec;
pub use validator::{PairOutcome, ResourceValidator, TaskErrorReporter};
