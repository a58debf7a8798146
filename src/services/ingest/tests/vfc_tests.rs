use super::*;

fn sample() -> Vfc {
    let mut vfc = Vfc::new();
    vfc.insert(
        "export_2024\\Connections\\Followers_And_Following\\following.json",
        "following".into(),
    );
    vfc.insert(
        "export_2024/connections/followers_and_following/followers_1.json",
        "followers-1".into(),
    );
    vfc.insert(
        "export_2024/connections/followers_and_following/followers_2.json",
        "followers-2".into(),
    );
    vfc.insert(
        "export_2024/your_instagram_activity/likes/liked_posts.json",
        "liked".into(),
    );
    vfc
}

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("A\\B/C.JSON"), "a/b/c.json");
}

#[test]
fn test_resolve_by_suffix_ignores_case_and_separators() {
    let vfc = sample();

    assert_eq!(
        vfc.resolve("followers_and_following/following.json"),
        Some("following")
    );
    assert_eq!(
        vfc.resolve("Followers_And_Following\\FOLLOWING.json"),
        Some("following")
    );
    assert_eq!(vfc.resolve("likes/liked_comments.json"), None);
}

#[test]
fn test_resolve_without_directory_uses_linear_scan() {
    let vfc = sample();

    // Partial final segment only matches through the full scan.
    assert_eq!(vfc.resolve("ers_1.json"), Some("followers-1"));
    assert_eq!(vfc.resolve(""), None);
}

#[test]
fn test_resolve_first_match_by_insertion_order() {
    let mut vfc = Vfc::new();
    vfc.insert("b/inbox/x/message_1.json", "inserted-first".into());
    vfc.insert("a/inbox/x/message_1.json", "inserted-second".into());

    assert_eq!(vfc.resolve("inbox/x/message_1.json"), Some("inserted-first"));
}

#[test]
fn test_resolve_uses_plain_suffix_semantics() {
    let mut vfc = Vfc::new();
    vfc.insert("root/old_likes/liked_posts.json", "old".into());

    // Plain suffix semantics: "likes/liked_posts.json" is a suffix of "old_likes/..."
    assert_eq!(vfc.resolve("likes/liked_posts.json"), Some("old"));
}

#[test]
fn test_colliding_paths_last_write_wins() {
    let mut vfc = Vfc::new();
    vfc.insert("Root/File.json", "first".into());
    vfc.insert("root/file.json", "second".into());

    assert_eq!(vfc.len(), 1);
    assert_eq!(vfc.get("ROOT/FILE.JSON"), Some("second"));
    assert_eq!(vfc.resolve("root/file.json"), Some("second"));
}

#[test]
fn test_resolve_pages_stops_at_first_gap() {
    let mut vfc = sample();
    vfc.insert(
        "export_2024/connections/followers_and_following/followers_4.json",
        "followers-4".into(),
    );

    let pages = vfc.resolve_pages("followers_and_following/followers");
    assert_eq!(pages, vec!["followers-1", "followers-2"]);
}

#[test]
fn test_entries_under_fragment() {
    let mut vfc = Vfc::new();
    vfc.insert("x/messages/inbox/amy_1/message_1.json", "a".into());
    vfc.insert("x/messages/message_requests/bo_2/message_1.json", "b".into());
    vfc.insert("messages/inbox/cy_3/message_1.json", "c".into());

    let inbox: Vec<&str> = vfc
        .entries_under("messages/inbox/")
        .into_iter()
        .map(|(_, text)| text)
        .collect();
    assert_eq!(inbox, vec!["a", "c"]);
}
