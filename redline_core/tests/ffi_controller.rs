use std::sync::Arc;

use redline_core::{
    diff_texts, normalize_json, open_comparison, open_comparison_with_config, Choice, CoreError,
    Disposition, HunkKind, ReviewController,
};

#[test]
fn controller_applies_decisions() -> Result<(), CoreError> {
    let controller = open_comparison("a b c".into(), "a c".into());

    let hunks = controller.hunks()?;
    assert_eq!(hunks.len(), 3);
    assert_eq!(hunks[1].kind, HunkKind::Deleted);
    assert_eq!(controller.materialize()?, "a c");

    controller.choose(1, Choice::Old)?;
    assert_eq!(controller.materialize()?, "a b c");
    assert_eq!(controller.stats()?.rejected, 1);

    controller.set_disposition(1, Disposition::Edited, Some("bee ".into()))?;
    controller.accept_all()?;
    assert_eq!(controller.materialize()?, "a bee c");

    controller.reset_all()?;
    assert!(!controller.has_decisions()?);
    Ok(())
}

#[test]
fn controller_rejects_edit_without_text() {
    let controller = open_comparison("a b c".into(), "a c".into());
    let result = controller.set_disposition(1, Disposition::Edited, None);
    assert!(matches!(result, Err(CoreError::MissingReplacement)));
}

#[test]
fn compare_replaces_review_state() -> Result<(), CoreError> {
    let controller = open_comparison("hello world".into(), "hello brave new world".into());
    assert!(!controller.compare("one".into(), "one two".into())?);

    controller.accept_all()?;
    assert!(controller.has_decisions()?);
    assert!(controller.compare("one two".into(), "one three".into())?);
    assert!(!controller.has_decisions()?);
    assert_eq!(controller.stats()?.pending, 2);
    Ok(())
}

#[test]
fn controller_honours_configuration() -> Result<(), CoreError> {
    let controller = open_comparison_with_config(
        "keep drop this".into(),
        "keep this".into(),
        "[review]\npending_deletions = \"keep\"\n".into(),
    )?;
    assert_eq!(controller.materialize()?, "keep drop this");

    let invalid = open_comparison_with_config(String::new(), String::new(), "[diff".into());
    assert!(matches!(invalid, Err(CoreError::Config)));
    Ok(())
}

#[test]
fn namespace_helpers() -> Result<(), CoreError> {
    let hunks = diff_texts("a c".into(), "a b c".into());
    assert_eq!(hunks[1].kind, HunkKind::Inserted);
    assert_eq!(hunks[1].text, "b ");

    assert_eq!(
        normalize_json(r#"{"ops":[{"insert":"from delta"}]}"#.into())?,
        "from delta"
    );
    assert!(matches!(
        normalize_json("{".into()),
        Err(CoreError::Content)
    ));
    Ok(())
}

#[test]
fn bindings_are_exported_from_the_crate_root() -> Result<(), CoreError> {
    let controller: Arc<ReviewController> =
        redline_core::ffi::open_comparison("hello world".into(), "hello world again".into());
    assert_eq!(controller.materialize()?, "hello world");
    controller.accept_all()?;
    assert_eq!(controller.materialize()?, "hello world again");
    Ok(())
}
