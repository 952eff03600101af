// src/resources/validator.rs

//! Pre-run existence checks for the file and directory inputs of a task.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::resources::expand::{FsGlobExpander, PatternExpander};
use crate::resources::kind::ResourceKind;
use crate::resources::spec::ResourceSpec;

/// Sink for validation failures.
///
/// `source` names whoever owns the check (typically the task name), so the
/// sink can attribute the message.
pub trait TaskErrorReporter {
    fn report_task_error(&self, message: &str, source: &str);
}

/// Outcome of [`ResourceValidator::validate_source_and_target_pairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOutcome {
    pub sources_ok: bool,
    pub targets_ok: bool,
}

impl PairOutcome {
    pub fn is_valid(&self) -> bool {
        self.sources_ok && self.targets_ok
    }
}

/// Checks that resources referenced by a task exist.
///
/// Every pattern and every resolved path is always checked; failures are
/// reported one by one and folded into a single boolean.
pub struct ResourceValidator<'a> {
    fs: Arc<dyn FileSystem>,
    expander: Box<dyn PatternExpander + 'a>,
    reporter: &'a dyn TaskErrorReporter,
    source: String,
}

impl<'a> ResourceValidator<'a> {
    /// Validator over the real filesystem.
    pub fn new(reporter: &'a dyn TaskErrorReporter, source: impl Into<String>) -> Self {
        Self::with_fs(Arc::new(RealFileSystem), reporter, source)
    }

    /// Validator over an arbitrary filesystem, expanding globs against it.
    pub fn with_fs(
        fs: Arc<dyn FileSystem>,
        reporter: &'a dyn TaskErrorReporter,
        source: impl Into<String>,
    ) -> Self {
        let expander = Box::new(FsGlobExpander::new(Arc::clone(&fs)));
        Self {
            fs,
            expander,
            reporter,
            source: source.into(),
        }
    }

    /// Swap the pattern expander (e.g. for a non-glob expansion scheme).
    pub fn with_expander(mut self, expander: impl PatternExpander + 'a) -> Self {
        self.expander = Box::new(expander);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Validate with the default kind, [`ResourceKind::FileOrDirectory`].
    pub fn validate_any(&self, resources: impl Into<ResourceSpec>) -> bool {
        self.validate(resources, ResourceKind::FileOrDirectory)
    }

    /// Validate with a kind given as a string (`"file"`, `"dir"`,
    /// `"fileAndDir"`).
    ///
    /// An unknown kind fails with `InvalidArgument` before the filesystem is
    /// touched.
    pub fn validate_with_kind(
        &self,
        resources: impl Into<ResourceSpec>,
        kind: &str,
    ) -> Result<bool> {
        let kind: ResourceKind = kind.parse()?;
        Ok(self.validate(resources, kind))
    }

    /// Expand every pattern and check every resulting path against `kind`.
    ///
    /// Returns `true` only if all patterns expanded and all paths passed.
    pub fn validate(&self, resources: impl Into<ResourceSpec>, kind: ResourceKind) -> bool {
        let patterns = resources.into().into_patterns();
        let mut success = true;

        for pattern in &patterns {
            let paths = match self.expander.expand(pattern) {
                Ok(paths) => paths,
                Err(err) => {
                    debug!(source = %self.source, %pattern, error = %err, "pattern expansion failed");
                    self.reporter.report_task_error(
                        &format!("Invalid glob pattern '{pattern}'!"),
                        &self.source,
                    );
                    success = false;
                    continue;
                }
            };

            for path in &paths {
                if !self.check_resource(path, kind) {
                    success = false;
                }
            }
        }

        debug!(
            source = %self.source,
            patterns = patterns.len(),
            %kind,
            success,
            "resource validation finished"
        );
        success
    }

    /// Validate the common `source => target` layout used by copy/mirror
    /// style tasks.
    ///
    /// Sources and targets are collected in pair order and checked as two
    /// independent batches; targets are only checked, never created.
    pub fn validate_source_and_target_pairs<I, S, T>(&self, pairs: I) -> PairOutcome
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let (sources, targets): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(source, target)| (source.into(), target.into()))
            .unzip();

        let sources_ok = self.validate(sources, ResourceKind::FileOrDirectory);
        let targets_ok = self.validate(targets, ResourceKind::FileOrDirectory);

        PairOutcome {
            sources_ok,
            targets_ok,
        }
    }

    fn check_resource(&self, path: &Path, kind: ResourceKind) -> bool {
        let ok = match kind {
            ResourceKind::File => self.fs.is_file(path),
            ResourceKind::Directory => self.fs.is_dir(path),
            ResourceKind::FileOrDirectory => self.fs.exists(path),
        };

        if !ok {
            self.reporter.report_task_error(
                &format!("{} '{}' does not exist!", kind.label(), path.display()),
                &self.source,
            );
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TaskguardError;
    use crate::fs::mock::MockFileSystem;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Collect(RefCell<Vec<(String, String)>>);

    impl TaskErrorReporter for Collect {
        fn report_task_error(&self, message: &str, source: &str) {
            self.0
                .borrow_mut()
                .push((message.to_string(), source.to_string()));
        }
    }

    impl Collect {
        fn messages(&self) -> Vec<String> {
            self.0.borrow().iter().map(|(m, _)| m.clone()).collect()
        }
    }

    fn fs_with(files: &[&str], dirs: &[&str]) -> MockFileSystem {
        let fs = MockFileSystem::new();
        for f in files {
            fs.add_file(f);
        }
        for d in dirs {
            fs.add_dir(d);
        }
        fs
    }

    #[test]
    fn missing_file_reports_once() {
        let fs = fs_with(&["data/a.txt"], &[]);
        let errors = Collect::default();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "copy");

        let ok = validator.validate(["./data/a.txt", "./data/missing.txt"], ResourceKind::File);

        assert!(!ok);
        assert_eq!(
            errors.messages(),
            vec!["File './data/missing.txt' does not exist!".to_string()]
        );
        assert_eq!(errors.0.borrow()[0].1, "copy");
    }

    #[test]
    fn kind_mismatch_is_a_failure() {
        let fs = fs_with(&["a.txt"], &["out"]);
        let errors = Collect::default();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "t");

        assert!(!validator.validate("a.txt", ResourceKind::Directory));
        assert!(!validator.validate("out", ResourceKind::File));
        assert!(validator.validate(["a.txt", "out"], ResourceKind::FileOrDirectory));

        assert_eq!(
            errors.messages(),
            vec![
                "Directory 'a.txt' does not exist!".to_string(),
                "File 'out' does not exist!".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_glob_does_not_stop_the_batch() {
        let fs = fs_with(&[], &[]);
        let errors = Collect::default();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "t");

        let ok = validator.validate_any(["src/{a,b", "missing.txt"]);

        assert!(!ok);
        assert_eq!(
            errors.messages(),
            vec![
                "Invalid glob pattern 'src/{a,b'!".to_string(),
                "File or directory 'missing.txt' does not exist!".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_kind_fails_before_any_fs_access() {
        let fs = fs_with(&["a.txt"], &[]);
        let errors = Collect::default();
        let validator = ResourceValidator::with_fs(Arc::new(fs.clone()), &errors, "t");

        let res = validator.validate_with_kind("a.txt", "folder");

        assert!(matches!(res, Err(TaskguardError::InvalidArgument(_))));
        assert_eq!(fs.query_count(), 0);
        assert!(errors.messages().is_empty());
    }

    #[test]
    fn pairs_check_sources_and_targets_independently() {
        let fs = fs_with(&["src/a.txt"], &[]);
        let errors = Collect::default();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "mirror");

        let outcome = validator.validate_source_and_target_pairs([("src/a.txt", "dist/a.txt")]);

        assert!(outcome.sources_ok);
        assert!(!outcome.targets_ok);
        assert!(!outcome.is_valid());
        assert_eq!(
            errors.messages(),
            vec!["File or directory 'dist/a.txt' does not exist!".to_string()]
        );
    }

    struct FixedExpander;

    impl PatternExpander for FixedExpander {
        fn expand(&self, pattern: &str) -> Result<Vec<std::path::PathBuf>> {
            Ok(vec![format!("{pattern}.1").into(), format!("{pattern}.2").into()])
        }
    }

    #[test]
    fn custom_expander_drives_the_checks() {
        let fs = fs_with(&["log.1"], &[]);
        let errors = Collect::default();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "t")
            .with_expander(FixedExpander);

        assert!(!validator.validate("log", ResourceKind::File));
        assert_eq!(errors.messages(), vec!["File 'log.2' does not exist!".to_string()]);
    }
}
