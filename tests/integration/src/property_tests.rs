//! Property tests over generated trees and databases

use std::collections::BTreeMap;

use proptest::prelude::*;
use treesum_core::{ChecksumStore, IgnoreMatcher, Reconciler, VerifyOptions, verify_tree};
use treesum_fs::checksum::compute_content_digest;
use treesum_test_utils::TestTree;

/// Relative paths with at most one directory level
fn path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-e]{1,3}\\.(txt|log)",
        "(src|doc)/[a-e]{1,3}\\.(txt|log)",
    ]
}

/// For each path: Some(content) on disk, and the content recorded in the
/// database (if any)
fn layout_strategy()
-> impl Strategy<Value = BTreeMap<String, (Option<String>, Option<String>)>> {
    prop::collection::btree_map(
        path_strategy(),
        (
            prop::option::of("[xyz]{0,4}"),
            prop::option::of("[xyz]{0,4}"),
        ),
        0..12,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn classification_is_complete(layout in layout_strategy(), ignore_logs in any::<bool>()) {
        let t = TestTree::new();
        let mut store = ChecksumStore::new();
        for (path, (disk, recorded)) in &layout {
            if let Some(content) = disk {
                t.write(path, content);
            }
            if let Some(content) = recorded {
                store.set(path.clone(), compute_content_digest(content.as_bytes()));
            }
        }
        let patterns: &[&str] = if ignore_logs { &["*.log"] } else { &[] };
        let ignore = IgnoreMatcher::load(Some(&t.write_ignore_list("ignore", patterns))).unwrap();

        let report = Reconciler::new(&t.tree(), &ignore, VerifyOptions::default())
            .reconcile(&mut store)
            .unwrap();

        let ignored = |p: &str| ignore_logs && p.ends_with(".log");
        let on_disk = layout
            .iter()
            .filter(|(p, (disk, _))| disk.is_some() && !ignored(p))
            .count();
        let vanished = layout
            .iter()
            .filter(|(p, (disk, recorded))| disk.is_none() && recorded.is_some() && !ignored(p))
            .count();
        let ignored_entries = layout
            .iter()
            .filter(|(p, (_, recorded))| recorded.is_some() && ignored(p))
            .count();

        prop_assert_eq!(report.verified + report.failed + report.added, on_disk);
        prop_assert_eq!(report.removed, vanished);
        prop_assert_eq!(report.ignored, ignored_entries);
    }

    #[test]
    fn second_pass_is_clean(layout in layout_strategy()) {
        let t = TestTree::new();
        for (path, (disk, _)) in &layout {
            if let Some(content) = disk {
                t.write(path, content);
            }
        }
        let db = t.path("checksums");
        let options = VerifyOptions { remove_deleted: true, ..VerifyOptions::default() };

        verify_tree(&t.tree(), &db, &IgnoreMatcher::empty(), options).unwrap();
        let written = std::fs::read(&db).ok();
        let second = verify_tree(&t.tree(), &db, &IgnoreMatcher::empty(), options).unwrap();

        prop_assert_eq!(second.failed, 0);
        prop_assert_eq!(second.added, 0);
        prop_assert_eq!(second.removed, 0);
        prop_assert!(!second.database_updated);
        prop_assert_eq!(std::fs::read(&db).ok(), written);
    }
}
