// src/resources/expand.rs

//! Pattern expansion: turning a (possibly wildcard) path pattern into the
//! concrete paths it names.
//!
//! The validator only talks to [`PatternExpander`]; the globbing primitive
//! behind it is an implementation detail of [`FsGlobExpander`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, trace};

use crate::errors::{Result, TaskguardError};
use crate::fs::FileSystem;

/// Expand a pattern to concrete paths, or fail if the pattern is malformed.
pub trait PatternExpander: Send + Sync {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// Glob expansion against a [`FileSystem`].
///
/// - Literal patterns (no wildcard characters) expand to themselves, whether
///   or not they exist.
/// - `*` and `?` stay within one path component; `**` crosses directories.
/// - Only the literal base directory of the pattern is walked, and only as
///   deep as the pattern can reach.
/// - A missing base directory or zero matches is an empty result, not an
///   error.
/// - Wildcards skip dot-names unless the pattern component starts with `.`.
/// - Each real directory is walked once, so symlink cycles terminate.
#[derive(Debug, Clone)]
pub struct FsGlobExpander {
    fs: Arc<dyn FileSystem>,
}

impl FsGlobExpander {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn walk(&self, dir: &Path, shown: &Path, level: usize, walk: &mut Walk<'_>) {
        let children = match self.fs.read_dir(dir) {
            Ok(children) => children,
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "skipping unreadable directory");
                return;
            }
        };

        for child in children {
            let Some(name) = child.file_name() else {
                continue;
            };
            if name.to_string_lossy().starts_with('.') && !walk.split.allows_hidden(level) {
                continue;
            }
            let shown_child = shown.join(name);

            if walk.matcher.is_match(&shown_child) {
                trace!(path = %shown_child.display(), "glob match");
                walk.out.push(shown_child.clone());
            }

            let descend = walk.split.depth.is_none_or(|d| level + 1 < d);
            if descend && self.fs.is_dir(&child) && walk.first_visit(self.fs.as_ref(), &child) {
                self.walk(&child, &shown_child, level + 1, walk);
            }
        }
    }
}

/// State shared across one recursive walk.
struct Walk<'a> {
    matcher: &'a GlobMatcher,
    split: &'a PatternSplit,
    /// Canonical directories already walked; symlink cycles end here.
    visited: HashSet<PathBuf>,
    out: Vec<PathBuf>,
}

impl Walk<'_> {
    fn first_visit(&mut self, fs: &dyn FileSystem, dir: &Path) -> bool {
        match fs.canonicalize(dir) {
            Ok(real) => {
                let fresh = self.visited.insert(real);
                if !fresh {
                    debug!(dir = %dir.display(), "directory already walked, not following");
                }
                fresh
            }
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "cannot resolve directory, not following");
                false
            }
        }
    }
}

impl PatternExpander for FsGlobExpander {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        if !has_glob_meta(pattern) {
            return Ok(vec![PathBuf::from(pattern)]);
        }

        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| TaskguardError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?
            .compile_matcher();

        let split = split_pattern(pattern);
        let walk_root = if split.base.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            split.base.clone()
        };

        if !self.fs.is_dir(&walk_root) {
            debug!(%pattern, base = %walk_root.display(), "glob base directory missing");
            return Ok(Vec::new());
        }

        let mut walk = Walk {
            matcher: &matcher,
            split: &split,
            visited: HashSet::new(),
            out: Vec::new(),
        };
        if !walk.first_visit(self.fs.as_ref(), &walk_root) {
            return Ok(Vec::new());
        }
        self.walk(&walk_root, &split.base, 0, &mut walk);

        let mut matches = walk.out;
        matches.sort();

        debug!(%pattern, matches = matches.len(), "expanded glob pattern");
        Ok(matches)
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

struct PatternSplit {
    /// Leading components without wildcards, spelled as in the pattern.
    base: PathBuf,
    /// How many components below `base` the pattern can reach;
    /// `None` when `**` makes it unbounded.
    depth: Option<usize>,
    /// The components from the first wildcard on.
    rest: Vec<String>,
}

impl PatternSplit {
    /// Whether a dot-name may match at `level` below the base.
    ///
    /// Wildcards never match a leading dot; the pattern component has to
    /// spell it out (`.*`, `.cache`). Under `**` the level of each component
    /// is unknown, so any dot component allows hidden names.
    fn allows_hidden(&self, level: usize) -> bool {
        match self.depth {
            Some(_) => self
                .rest
                .iter()
                .filter(|seg| !seg.is_empty())
                .nth(level)
                .is_some_and(|seg| seg.starts_with('.')),
            None => self.rest.iter().any(|seg| seg.starts_with('.')),
        }
    }
}

fn split_pattern(pattern: &str) -> PatternSplit {
    let segments: Vec<&str> = pattern.split('/').collect();
    let first_meta = segments
        .iter()
        .position(|seg| has_glob_meta(seg))
        .unwrap_or(segments.len());

    let joined = segments[..first_meta].join("/");
    let base = if joined.is_empty() && pattern.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::from(joined)
    };

    let rest = &segments[first_meta..];
    let depth = if rest.iter().any(|seg| seg.contains("**")) {
        None
    } else {
        Some(rest.iter().filter(|seg| !seg.is_empty()).count())
    };

    PatternSplit {
        base,
        depth,
        rest: rest.iter().map(|seg| seg.to_string()).collect(),
    }
}
