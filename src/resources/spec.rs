// src/resources/spec.rs

use serde::Deserialize;

/// One pattern or an ordered list of patterns.
///
/// Mirrors the manifest, where both forms are accepted:
///
/// ```toml
/// inputs = "Cargo.toml"
/// inputs = ["src/**/*.rs", "Cargo.toml"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResourceSpec {
    Single(String),
    Many(Vec<String>),
}

impl ResourceSpec {
    /// Normalise into an ordered list of patterns.
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            ResourceSpec::Single(pattern) => vec![pattern],
            ResourceSpec::Many(patterns) => patterns,
        }
    }

    pub fn patterns(&self) -> &[String] {
        match self {
            ResourceSpec::Single(pattern) => std::slice::from_ref(pattern),
            ResourceSpec::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for ResourceSpec {
    fn from(pattern: &str) -> Self {
        ResourceSpec::Single(pattern.to_string())
    }
}

impl From<String> for ResourceSpec {
    fn from(pattern: String) -> Self {
        ResourceSpec::Single(pattern)
    }
}

impl From<Vec<String>> for ResourceSpec {
    fn from(patterns: Vec<String>) -> Self {
        ResourceSpec::Many(patterns)
    }
}

impl From<Vec<&str>> for ResourceSpec {
    fn from(patterns: Vec<&str>) -> Self {
        ResourceSpec::Many(patterns.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ResourceSpec {
    fn from(patterns: [&str; N]) -> Self {
        ResourceSpec::Many(patterns.iter().map(|p| p.to_string()).collect())
    }
}
