use std::fs;

use redline_core::{
    Comparison, Config, DocumentContent, Error, Granularity, HunkKind, PendingDeletions,
    VersionRef,
};
use tempfile::TempDir;

#[test]
fn config_is_loaded_from_disk() -> redline_core::Result<()> {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("redline.toml");
    fs::write(
        &path,
        "[diff]\ngranularity = \"line\"\n\n[review]\npending_deletions = \"keep\"\n",
    )
    .expect("write config");

    let config = Config::load(&path)?;
    assert_eq!(config.diff.granularity, Granularity::Line);
    assert_eq!(config.review.pending_deletions, PendingDeletions::Keep);

    let comparison = Comparison::new(
        VersionRef::latest(DocumentContent::Text("first\nsecond\n".into())),
        VersionRef::numbered(1, DocumentContent::Text("first\nthird\n".into())),
    );
    let session = comparison.session(&config);
    let kinds: Vec<HunkKind> = session.hunks().iter().map(|hunk| hunk.kind).collect();
    assert_eq!(
        kinds,
        vec![HunkKind::Unchanged, HunkKind::Deleted, HunkKind::Inserted]
    );
    assert_eq!(session.materialize(), "first\nthird\n");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir");
    let result = Config::load(temp.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn malformed_file_reports_its_path() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[review]\npending_deletions = \"maybe\"\n").expect("write config");

    match Config::load(&path) {
        Err(Error::Config {
            path: Some(reported),
            ..
        }) => assert!(reported.ends_with("broken.toml")),
        other => panic!("expected config error, got {other:?}"),
    }
}
