// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{Manifest, RawManifest};
use crate::errors::Result;

/// Load a manifest from a given path and return the raw `RawManifest`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawManifest> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let manifest: RawManifest = toml::from_str(&contents)?;

    Ok(manifest)
}

/// Load a manifest from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Parses every `kind` and checks every task declares something to check.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Manifest> {
    let raw = load_from_path(&path)?;
    let manifest = Manifest::try_from(raw)?;
    Ok(manifest)
}

/// Default manifest location: `Taskguard.toml` in the working directory.
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from("Taskguard.toml")
}
