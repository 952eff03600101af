// src/config/mod.rs

//! Manifest loading and validation for the preflight runner.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest from disk (`loader.rs`).
//! - Validate it into typed task checks (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_manifest_path, load_and_validate, load_from_path};
pub use model::{ConfigSection, Manifest, RawManifest, RawTaskCheck, TaskCheck};
