//! End-to-end sync over real directories
//!
//! Every test lays out a source and a target tree on disk, runs a sync
//! through [`OsFs`], and inspects the resulting target.

use std::time::{Duration, UNIX_EPOCH};

use dsync::{Options, SyncConfig, skip, sync};
use dsync_fs::{OsFs, OverlayFs, RelPath};
use dsync_test_utils::TestTree;
use pretty_assertions::assert_eq;

/// Route sync events to the test output; later calls are no-ops.
fn init_logging() {
    let _ = dsync::logging::init();
}

fn run(source: &TestTree, target: &TestTree, options: &Options) -> Vec<String> {
    init_logging();
    let root = RelPath::root();
    sync(&source.fs(), &root, &target.fs(), &root, options)
        .unwrap()
        .entries()
        .map(|(kind, path)| format!("{kind}:{path}"))
        .collect()
}

#[test]
fn test_sync_into_empty_target() {
    let source = TestTree::new()
        .file("README.md", "readme")
        .file("src/main.rs", "fn main() {}")
        .file("src/util/mod.rs", "// util");
    let target = TestTree::new();

    let ops = run(&source, &target, &Options::new());

    assert_eq!(
        ops,
        vec!["create:README.md", "create:src/main.rs", "create:src/util/mod.rs"]
    );
    assert_eq!(target.files(), source.files());
}

#[test]
fn test_sync_deletes_extra_entries() {
    let source = TestTree::new().file("keep.txt", "keep");
    let target = TestTree::new()
        .file("keep.txt", "keep")
        .file("stale.txt", "stale")
        .file("old/deep/file.txt", "old");
    let modified = UNIX_EPOCH + Duration::from_secs(1_000);
    source.set_modified("keep.txt", modified);
    target.set_modified("keep.txt", modified);

    let ops = run(&source, &target, &Options::new());

    assert_eq!(ops, vec!["delete:old", "delete:stale.txt"]);
    target.assert_missing("old");
    target.assert_missing("stale.txt");
    target.assert_file("keep.txt", "keep");
}

#[test]
fn test_sync_updates_changed_file() {
    let source = TestTree::new().file("config.toml", "version = 2");
    let target = TestTree::new().file("config.toml", "version = 1 # old");

    let ops = run(&source, &target, &Options::new());

    assert_eq!(ops, vec!["update:config.toml"]);
    target.assert_file("config.toml", "version = 2");
}

#[test]
fn test_second_sync_is_a_no_op() {
    let source = TestTree::new()
        .file("a.txt", "a")
        .file("nested/b.txt", "b")
        .dir("empty");
    let target = TestTree::new().file("nested/b.txt", "outdated");

    run(&source, &target, &Options::new());
    let again = run(&source, &target, &Options::new());

    assert!(again.is_empty(), "second sync produced {again:?}");
    assert_eq!(target.files(), source.files());
}

#[test]
fn test_skipped_paths_are_left_alone() {
    let source = TestTree::new()
        .file("bud/app.go", "app")
        .file("bud/generate/main.go", "new generated");
    let target = TestTree::new().file("bud/generate/main.go", "hand edited");
    let options = Options::new().skip(skip::path("bud/generate"));

    let ops = run(&source, &target, &options);

    assert_eq!(ops, vec!["create:bud/app.go"]);
    target.assert_file("bud/generate/main.go", "hand edited");
}

#[test]
fn test_kind_changes_on_disk() {
    let source = TestTree::new()
        .file("x/inner.txt", "inner")
        .file("y", "now a file");
    let target = TestTree::new()
        .file("x", "was a file")
        .file("y/deep/old.txt", "old");

    run(&source, &target, &Options::new());

    target.assert_dir("x");
    target.assert_file("x/inner.txt", "inner");
    target.assert_file("y", "now a file");
    assert_eq!(target.files(), source.files());
}

#[test]
fn test_subtree_roots() {
    init_logging();
    let tree = TestTree::new()
        .file("generated/app/main.rs", "fn main() {}")
        .file("out/app/stale.rs", "// stale")
        .file("untouched.txt", "outside both roots");
    let fs = OsFs::new(tree.root());

    sync(
        &fs,
        &RelPath::new("generated"),
        &fs,
        &RelPath::new("out"),
        &Options::new(),
    )
    .unwrap();

    tree.assert_file("out/app/main.rs", "fn main() {}");
    tree.assert_missing("out/app/stale.rs");
    tree.assert_file("untouched.txt", "outside both roots");
}

#[test]
fn test_dry_run_leaves_target_untouched() {
    let source = TestTree::new().file("new.txt", "new");
    let target = TestTree::new().file("old.txt", "old");

    let ops = run(&source, &target, &Options::new().dry_run(true));

    assert_eq!(ops, vec!["create:new.txt", "delete:old.txt"]);
    target.assert_missing("new.txt");
    target.assert_file("old.txt", "old");
}

#[test]
fn test_overlay_source() {
    init_logging();
    let base = TestTree::new()
        .file("a.txt", "base a")
        .file("b.txt", "base b");
    let patch = TestTree::new().file("b.txt", "patched b");
    let target = TestTree::new();
    let source = OverlayFs::new(patch.fs(), base.fs());
    let root = RelPath::root();

    sync(&source, &root, &target.fs(), &root, &Options::new()).unwrap();

    target.assert_file("a.txt", "base a");
    target.assert_file("b.txt", "patched b");
}

#[test]
fn test_config_file_drives_sync() {
    let source = TestTree::new()
        .file(".hidden/secret", "s")
        .file("build/out.tmp", "tmp")
        .file("build/out.bin", "bin");
    let target = TestTree::new();
    let config_dir = TestTree::new().file(
        "sync.toml",
        "stamp = \"content\"\n\n[skip]\nhidden = true\npatterns = ['\\.tmp$']\n",
    );
    let options = SyncConfig::load(&config_dir.path("sync.toml"))
        .unwrap()
        .to_options()
        .unwrap();

    let ops = run(&source, &target, &options);

    assert_eq!(ops, vec!["create:build/out.bin"]);
}
