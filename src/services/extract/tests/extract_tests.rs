use super::*;
use crate::test_utils::vfc_from;

const SAVED: DocSpec = DocSpec {
    suffixes: &["saved/saved_posts.json", "saved/saved_media.json"],
    shapes: &[Shape::Key("saved_saved_media"), Shape::RootArray],
};

#[test]
fn test_records_uses_first_resolvable_suffix() {
    let vfc = vfc_from(&[(
        "export/your_instagram_activity/saved/saved_media.json",
        r#"{"saved_saved_media": [{}, {}]}"#,
    )]);
    let config = IngestConfig::default();
    let ctx = ExtractContext::new(&vfc, &config);

    assert_eq!(ctx.records(&SAVED).len(), 2);
}

#[test]
fn test_records_absent_and_malformed_are_empty() {
    let config = IngestConfig::default();

    let empty = Vfc::new();
    assert!(ExtractContext::new(&empty, &config).records(&SAVED).is_empty());

    let broken = vfc_from(&[("saved/saved_posts.json", "{ not json")]);
    let ctx = ExtractContext::new(&broken, &config);
    assert!(ctx.document(&SAVED).is_some());
    assert!(ctx.records(&SAVED).is_empty());
}

#[test]
fn test_paged_records_concatenates_pages_in_order() {
    let vfc = vfc_from(&[
        ("a/comments/post_comments_2.json", r#"[{"title": "second"}]"#),
        ("a/comments/post_comments_1.json", r#"[{"title": "first"}]"#),
        ("a/comments/post_comments_4.json", r#"[{"title": "orphan"}]"#),
    ]);
    let config = IngestConfig::default();
    let ctx = ExtractContext::new(&vfc, &config);

    let items = ctx.paged_records("comments/post_comments", &[Shape::RootArray]);
    let titles: Vec<_> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn test_paged_records_falls_back_to_single_document() {
    let vfc = vfc_from(&[("comments/post_comments.json", r#"[{}, {}, {}]"#)]);
    let config = IngestConfig::default();
    let ctx = ExtractContext::new(&vfc, &config);

    assert_eq!(
        ctx.paged_records("comments/post_comments", &[Shape::RootArray]).len(),
        3
    );
}
