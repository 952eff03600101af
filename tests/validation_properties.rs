// tests/validation_properties.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use taskguard::fs::mock::MockFileSystem;
use taskguard::resources::{ResourceKind, ResourceValidator};
use taskguard_test_utils::fakes::RecordingErrorReporter;

// Flat file names under `data/`, split into present and absent sets.
fn layout_strategy() -> impl Strategy<Value = (BTreeSet<String>, BTreeSet<String>)> {
    let names = || proptest::collection::btree_set("[a-z]{1,6}\\.txt", 1..8);
    (names(), names()).prop_map(|(present, candidates)| {
        let absent = candidates.difference(&present).cloned().collect();
        (present, absent)
    })
}

fn fs_with(present: &BTreeSet<String>) -> MockFileSystem {
    let fs = MockFileSystem::new();
    for name in present {
        fs.add_file(format!("data/{name}"));
    }
    fs
}

proptest! {
    #[test]
    fn all_present_means_valid_and_silent((present, _absent) in layout_strategy()) {
        let fs = fs_with(&present);
        let errors = RecordingErrorReporter::new();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "prop");

        let patterns: Vec<String> = present.iter().map(|n| format!("data/{n}")).collect();
        prop_assert!(validator.validate(patterns, ResourceKind::File));
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn one_error_per_missing_path((present, absent) in layout_strategy()) {
        let fs = fs_with(&present);
        let errors = RecordingErrorReporter::new();
        let validator = ResourceValidator::with_fs(Arc::new(fs), &errors, "prop");

        let patterns: Vec<String> = present
            .iter()
            .chain(absent.iter())
            .map(|n| format!("data/{n}"))
            .collect();
        let ok = validator.validate(patterns, ResourceKind::File);

        prop_assert_eq!(ok, absent.is_empty());
        prop_assert_eq!(errors.len(), absent.len());
        for name in &absent {
            let expected = format!("File 'data/{name}' does not exist!");
            prop_assert!(errors.messages().contains(&expected));
        }
    }

    #[test]
    fn single_string_matches_one_element_list(name in "[a-z]{1,6}\\.txt", exists in any::<bool>()) {
        let present: BTreeSet<String> = if exists {
            [name.clone()].into_iter().collect()
        } else {
            BTreeSet::new()
        };
        let fs = fs_with(&present);
        let pattern = format!("data/{name}");

        let single_errors = RecordingErrorReporter::new();
        let single = ResourceValidator::with_fs(Arc::new(fs.clone()), &single_errors, "p")
            .validate(pattern.clone(), ResourceKind::FileOrDirectory);

        let list_errors = RecordingErrorReporter::new();
        let list = ResourceValidator::with_fs(Arc::new(fs), &list_errors, "p")
            .validate(vec![pattern], ResourceKind::FileOrDirectory);

        prop_assert_eq!(single, list);
        prop_assert_eq!(single, exists);
        prop_assert_eq!(single_errors.messages(), list_errors.messages());
    }

    #[test]
    fn unknown_kind_never_touches_the_filesystem(kind in "[a-zA-Z]{1,10}") {
        prop_assume!(!["file", "dir", "directory", "fileAndDir", "any"].contains(&kind.as_str()));

        let fs = MockFileSystem::new();
        fs.add_file("data/a.txt");
        let errors = RecordingErrorReporter::new();
        let validator = ResourceValidator::with_fs(Arc::new(fs.clone()), &errors, "p");

        prop_assert!(validator.validate_with_kind(vec!["data/a.txt", "data/*.txt"], &kind).is_err());
        prop_assert_eq!(fs.query_count(), 0);
        prop_assert!(errors.is_empty());
    }
}
