//! Cross-crate workflow tests
//!
//! Drive the public API the way a mirroring setup would: verify a local
//! tree, diff its database against a remote one, then replay the patch onto
//! a copy of the remote tree and check that both trees now verify against
//! the local database.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use pretty_assertions::assert_eq;
use treesum_core::{
    ChecksumStore, DiffOptions, IgnoreMatcher, PatchKind, Settings, VerifyOptions,
    VerifyReport, generate_patch, read_manifest, verify_tree,
};
use treesum_fs::{NormalizedPath, TreeWalker};
use treesum_test_utils::TestTree;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Every file under `root` keyed by relative path
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    TreeWalker::new(root)
        .map(|file| {
            let file = file.unwrap();
            let content = fs::read(&file.absolute).unwrap();
            (file.relative.into_string(), content)
        })
        .collect()
}

/// Replay a patch archive onto `root`, in index order.
///
/// Patch application is not part of the library; this exists only to prove
/// that a generated patch carries everything needed to rebuild the tree.
fn apply_patch(patch: &Path, root: &Path) {
    let mut archive = zip::ZipArchive::new(fs::File::open(patch).unwrap()).unwrap();

    for entry in read_manifest(patch).unwrap() {
        let op = entry.operation;
        let target = NormalizedPath::new(&op.path).resolve(root);
        if op.kind == PatchKind::Delete {
            fs::remove_file(&target).unwrap();
            continue;
        }

        let mut data = Vec::new();
        archive
            .by_name(&op.data_name())
            .unwrap()
            .read_to_end(&mut data)
            .unwrap();
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, data).unwrap();
    }
}

fn all_diff_modes() -> DiffOptions {
    DiffOptions {
        diff_new: true,
        diff_changed: true,
        diff_deleted: true,
        verify_payload: true,
    }
}

// =============================================================================
// Workflows
// =============================================================================

#[test]
fn patch_turns_remote_tree_into_local_tree() {
    let local = TestTree::new();
    local.write("index.html", "<h1>v2</h1>");
    local.write("assets/app.js", "console.log(2)");
    local.write("assets/new.css", "body {}");
    local.write("notes.tmp", "scratch");

    let remote = TestTree::new();
    remote.write("index.html", "<h1>v1</h1>");
    remote.write("assets/app.js", "console.log(2)");
    remote.write("assets/old.css", "p {}");

    let ignore_path = local.write_ignore_list("ignore", &["*.tmp"]);
    let ignore = IgnoreMatcher::load(Some(&ignore_path)).unwrap();
    let local_db = local.path("checksums");
    let remote_db = remote.path("checksums");

    verify_tree(&local.tree(), &local_db, &ignore, VerifyOptions::default()).unwrap();
    verify_tree(&remote.tree(), &remote_db, &ignore, VerifyOptions::default()).unwrap();

    let patch = local.path("update.zip");
    let report = generate_patch(
        &ChecksumStore::load(&local_db).unwrap(),
        &mut ChecksumStore::load(&remote_db).unwrap(),
        &local.tree(),
        &patch,
        &ignore,
        all_diff_modes(),
    )
    .unwrap();
    assert_eq!((report.new, report.changed, report.deleted), (1, 1, 1));

    apply_patch(&patch, &remote.tree());

    let mut expected = snapshot(&local.tree());
    expected.remove("notes.tmp");
    assert_eq!(snapshot(&remote.tree()), expected);

    // The rebuilt remote verifies cleanly against the local database
    let check = VerifyOptions {
        add_new: false,
        ..VerifyOptions::default()
    };
    let again = verify_tree(&remote.tree(), &local_db, &ignore, check).unwrap();
    assert_eq!(
        again,
        VerifyReport {
            verified: 3,
            ..Default::default()
        }
    );
}

#[test]
fn manifest_orders_local_operations_before_deletes() {
    let t = TestTree::new();
    t.write("z.txt", "z");
    t.write("a.txt", "a2");
    let local = t.write_database("local", &[("z.txt", "z"), ("a.txt", "a2")]);
    let remote = t.write_database("remote", &[("gone.txt", "g"), ("a.txt", "a1")]);
    let patch = t.path("patch.zip");

    generate_patch(
        &ChecksumStore::load(&local).unwrap(),
        &mut ChecksumStore::load(&remote).unwrap(),
        &t.tree(),
        &patch,
        &IgnoreMatcher::empty(),
        all_diff_modes(),
    )
    .unwrap();

    let kinds: Vec<(usize, PatchKind, String)> = read_manifest(&patch)
        .unwrap()
        .into_iter()
        .map(|m| (m.operation.index, m.operation.kind, m.operation.path))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (0, PatchKind::Add, "z.txt".to_string()),
            (1, PatchKind::Replace, "a.txt".to_string()),
            (2, PatchKind::Delete, "gone.txt".to_string()),
        ]
    );
}

#[test]
fn settings_file_drives_both_passes() {
    let t = TestTree::new();
    t.write("keep.txt", "k");
    let settings_path = t.write_raw(
        "treesum.yaml",
        "verify:\n  remove_deleted: true\ndiff:\n  diff_deleted: true\n  diff_new: false\n",
    );
    let settings = Settings::load(&settings_path).unwrap();
    assert!(settings.verify.add_new);

    let db = t.write_database("checksums", &[("keep.txt", "k"), ("lost.txt", "l")]);
    let report = verify_tree(&t.tree(), &db, &IgnoreMatcher::empty(), settings.verify).unwrap();
    assert_eq!(report.removed, 1);
    assert!(report.database_updated);

    t.write("extra.txt", "x");
    let local = t.write_database("local", &[("keep.txt", "k"), ("extra.txt", "x")]);
    let remote = t.write_database("remote", &[("keep.txt", "k"), ("old.txt", "o")]);
    let diff = generate_patch(
        &ChecksumStore::load(&local).unwrap(),
        &mut ChecksumStore::load(&remote).unwrap(),
        &t.tree(),
        &t.path("patch.zip"),
        &IgnoreMatcher::empty(),
        settings.diff,
    )
    .unwrap();
    assert_eq!((diff.new, diff.deleted), (0, 1));
}

#[test]
fn failed_pass_leaves_readable_partial_patch() {
    let t = TestTree::new();
    t.write("a.txt", "a");
    // b.txt is listed locally but missing from the tree
    let local = t.write_database("local", &[("a.txt", "a"), ("b.txt", "b")]);
    let remote = t.write_raw("remote", "");
    let patch = t.path("patch.zip");

    let result = generate_patch(
        &ChecksumStore::load(&local).unwrap(),
        &mut ChecksumStore::load(&remote).unwrap(),
        &t.tree(),
        &patch,
        &IgnoreMatcher::empty(),
        DiffOptions::default(),
    );

    assert!(result.is_err());
    let manifest = read_manifest(&patch).unwrap();
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest[0].operation.path, "a.txt");
}
