// tests/resource_validation.rs

use std::fs;
use std::path::Path;
use std::sync::Arc;

use taskguard::fs::RealFileSystem;
use taskguard::resources::{ResourceKind, ResourceValidator};
use taskguard_test_utils::fakes::RecordingErrorReporter;
use taskguard_test_utils::init_tracing;
use tempfile::TempDir;

fn path_str(root: &Path, rel: &str) -> String {
    root.join(rel).to_string_lossy().replace('\\', "/")
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data/nested")).unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("data/a.txt"), "a").unwrap();
    fs::write(dir.path().join("data/b.txt"), "b").unwrap();
    fs::write(dir.path().join("data/nested/c.txt"), "c").unwrap();
    fs::write(dir.path().join("src/a.txt"), "src").unwrap();
    dir
}

#[test]
fn one_missing_file_reports_exactly_one_error() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "copy-data");

    let present = path_str(dir.path(), "data/a.txt");
    let missing = path_str(dir.path(), "data/missing.txt");
    let ok = validator.validate(vec![present, missing.clone()], ResourceKind::File);

    assert!(!ok);
    assert_eq!(errors.messages(), vec![format!("File '{missing}' does not exist!")]);
    assert_eq!(errors.sources(), vec!["copy-data".to_string()]);
}

#[test]
fn everything_present_is_silent() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    assert!(validator.validate(path_str(dir.path(), "data"), ResourceKind::Directory));
    assert!(validator.validate(path_str(dir.path(), "data/*.txt"), ResourceKind::File));
    assert!(validator.validate_any(vec![
        path_str(dir.path(), "src"),
        path_str(dir.path(), "src/a.txt"),
    ]));
    assert!(errors.is_empty());
}

#[test]
fn glob_matches_are_checked_against_kind() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    // `data/*` matches a.txt, b.txt and the `nested` directory.
    let ok = validator.validate(path_str(dir.path(), "data/*"), ResourceKind::File);

    assert!(!ok);
    assert_eq!(
        errors.messages(),
        vec![format!(
            "File '{}' does not exist!",
            path_str(dir.path(), "data/nested")
        )]
    );
}

#[test]
fn wildcards_ignore_hidden_entries() {
    init_tracing();
    let dir = project();
    fs::create_dir_all(dir.path().join("src/.cache")).unwrap();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    assert!(validator.validate(path_str(dir.path(), "src/*"), ResourceKind::File));
    assert!(errors.is_empty());

    // Naming the dot explicitly brings the directory back into view.
    assert!(!validator.validate(path_str(dir.path(), "src/.*"), ResourceKind::File));
    assert_eq!(
        errors.messages(),
        vec![format!(
            "File '{}' does not exist!",
            path_str(dir.path(), "src/.cache")
        )]
    );
}

#[cfg(unix)]
#[test]
fn symlink_loop_does_not_duplicate_matches() {
    use std::os::unix::fs::symlink;

    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/a.rs"), "").unwrap();
    symlink("..", dir.path().join("src/loop")).unwrap();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    // Every resolved path fails a directory check, so the error count is the
    // match count.
    assert!(!validator.validate(path_str(dir.path(), "src/**/*.rs"), ResourceKind::Directory));
    assert_eq!(
        errors.messages(),
        vec![format!(
            "Directory '{}' does not exist!",
            path_str(dir.path(), "src/a.rs")
        )]
    );
}

#[test]
fn recursive_glob_reaches_nested_files() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    assert!(validator.validate(path_str(dir.path(), "data/**/*.txt"), ResourceKind::File));
    assert!(errors.is_empty());
}

#[test]
fn wildcard_without_matches_passes() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    assert!(validator.validate_any(path_str(dir.path(), "data/*.json")));
    assert!(validator.validate_any(path_str(dir.path(), "nowhere/*.txt")));
    assert!(errors.is_empty());
}

#[test]
fn malformed_glob_is_reported_and_batch_continues() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    let bad = path_str(dir.path(), "data/[ab.txt");
    let missing = path_str(dir.path(), "gone");
    let ok = validator.validate_any(vec![bad.clone(), missing.clone()]);

    assert!(!ok);
    assert_eq!(
        errors.messages(),
        vec![
            format!("Invalid glob pattern '{bad}'!"),
            format!("File or directory '{missing}' does not exist!"),
        ]
    );
}

#[test]
fn source_and_target_pairs_fail_on_missing_target_dir() {
    init_tracing();
    let dir = project();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::with_fs(Arc::new(RealFileSystem), &errors, "mirror");

    let source = path_str(dir.path(), "src/a.txt");
    let target = path_str(dir.path(), "dist/a.txt");
    let outcome = validator.validate_source_and_target_pairs([(source, target.clone())]);

    assert!(outcome.sources_ok);
    assert!(!outcome.targets_ok);
    assert!(!outcome.is_valid());
    assert_eq!(
        errors.messages(),
        vec![format!("File or directory '{target}' does not exist!")]
    );
    assert!(!dir.path().join("dist").exists(), "targets must never be created");
}

#[test]
fn unknown_kind_string_is_rejected() {
    init_tracing();
    let errors = RecordingErrorReporter::new();
    let validator = ResourceValidator::new(&errors, "t");

    let res = validator.validate_with_kind("anything", "symlink");
    assert!(matches!(
        res,
        Err(taskguard::errors::TaskguardError::InvalidArgument(_))
    ));
    assert!(errors.is_empty());
}
