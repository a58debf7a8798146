use super::*;
use crate::test_utils::init_test_logger;
use tempfile::TempDir;

fn create_export_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let follow = dir.path().join("connections").join("followers_and_following");
    fs::create_dir_all(&follow).unwrap();
    fs::create_dir_all(dir.path().join("media")).unwrap();

    fs::write(follow.join("followers_1.json"), "[]").unwrap();
    fs::write(follow.join("following.json"), "{}").unwrap();
    fs::write(dir.path().join("media").join("a.jpg"), [0xFF, 0xD8]).unwrap();
    fs::write(dir.path().join("index.html"), "<html/>").unwrap();

    dir
}

#[test]
fn test_read_directory_keeps_json_with_relative_paths() {
    init_test_logger();
    let dir = create_export_dir();
    let mut events = Vec::new();

    let vfc = read_directory(dir.path(), &IngestConfig::default(), &mut |p| events.push(p)).unwrap();

    assert_eq!(vfc.len(), 2);
    assert_eq!(
        vfc.get("connections/followers_and_following/followers_1.json"),
        Some("[]")
    );
    // One signal per file plus the terminal signal.
    assert_eq!(events.len(), 5);
    assert_eq!(events.last().unwrap().fraction, Some(1.0));
}

#[test]
fn test_read_directory_missing_root_is_error() {
    let dir = TempDir::new().unwrap();
    let result = read_directory(
        &dir.path().join("nope"),
        &IngestConfig::default(),
        &mut |_| {},
    );
    assert!(matches!(result, Err(IngestError::Io(_))));
}

#[test]
fn test_read_directory_skips_invalid_utf8_file() {
    init_test_logger();
    let dir = create_export_dir();
    fs::write(dir.path().join("broken.json"), [0x7B, 0xC3, 0x28, 0x7D]).unwrap();

    let vfc = read_directory(dir.path(), &IngestConfig::default(), &mut |_| {}).unwrap();
    assert_eq!(vfc.len(), 2);
    assert!(vfc.resolve("broken.json").is_none());
}

#[test]
fn test_read_selected_files() {
    let files = vec![
        SelectedFile {
            relative_path: "export\\likes\\liked_posts.json".into(),
            contents: b"{\"likes_media_likes\": []}".to_vec(),
        },
        SelectedFile {
            relative_path: "export/media/clip.mp4".into(),
            contents: vec![0, 1, 2],
        },
    ];
    let mut fractions = Vec::new();

    let vfc = read_selected_files(files, &IngestConfig::default(), &mut |p| {
        fractions.push(p.fraction)
    });

    assert_eq!(vfc.len(), 1);
    assert!(vfc.resolve("likes/liked_posts.json").is_some());
    assert_eq!(fractions, vec![Some(0.5), Some(1.0), Some(1.0)]);
}

#[test]
fn test_read_selected_files_empty() {
    let mut events = Vec::new();
    let vfc = read_selected_files(Vec::new(), &IngestConfig::default(), &mut |p| events.push(p));

    assert!(vfc.is_empty());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].fraction, Some(1.0));
}
