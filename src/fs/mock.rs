// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntry {
    File,
    Dir,
}

/// In-memory filesystem for tests.
///
/// Paths are normalised (`./a/b` and `a/b` are the same entry) and every
/// query through the [`FileSystem`] trait bumps a counter, so tests can
/// assert that no filesystem access happened at all.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
    queries: Arc<AtomicUsize>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        // Ensure root exists
        entries.insert(PathBuf::from("."), MockEntry::Dir);

        Self {
            entries: Arc::new(Mutex::new(entries)),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut entries = self.entries.lock().unwrap();
        if let Some(parent) = path.parent() {
            ensure_dirs(&mut entries, parent);
        }
        entries.insert(path, MockEntry::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut entries = self.entries.lock().unwrap();
        ensure_dirs(&mut entries, &path);
    }

    /// Number of trait calls made against this filesystem so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn lookup(&self, path: &Path) -> Option<MockEntry> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().unwrap();
        entries.get(&normalize(path)).copied()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_dirs(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
    let mut current = PathBuf::from(".");
    for component in path.components() {
        if let Component::CurDir = component {
            continue;
        }
        current = normalize(&current.join(component));
        entries.entry(current.clone()).or_insert(MockEntry::Dir);
    }
}

/// Strip `.` components; an empty result maps to the root `"."`.
fn normalize(path: &Path) -> PathBuf {
    let stripped: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if stripped.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        stripped
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lookup(path) == Some(MockEntry::File)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lookup(path) == Some(MockEntry::Dir)
    }

    /// The mock has no symlinks, so this is path normalisation plus an
    /// existence check.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        match self.lookup(path) {
            Some(_) => Ok(normalize(path)),
            None => Err(anyhow!("No such file or directory: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if self.lookup(path) != Some(MockEntry::Dir) {
            return Err(anyhow!("Not a directory or not found: {:?}", path));
        }

        let dir = normalize(path);
        let entries = self.entries.lock().unwrap();
        let children = entries
            .keys()
            .filter(|candidate| {
                let parent = candidate.parent().map(normalize);
                *candidate != &dir && parent.as_deref() == Some(dir.as_path())
            })
            .filter_map(|candidate| candidate.file_name())
            .map(|name| path.join(name))
            .collect();
        Ok(children)
    }
}
