#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Once;
use zip::write::SimpleFileOptions;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// In-memory ZIP of `(path, contents)` pairs.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        writer.start_file(*name, options).expect("start file");
        writer.write_all(contents.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Lay `(path, contents)` pairs out below `root`.
pub fn write_tree(root: &Path, entries: &[(&str, &str)]) {
    for (name, contents) in entries {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write file");
    }
}

pub const FOLLOWERS: &str = r#"[
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/alice", "value": "alice", "timestamp": 1700000000}]},
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/bob", "value": "bob", "timestamp": 1700000000}]}
]"#;

pub const FOLLOWING: &str = r#"{"relationships_following": [
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/alice", "value": "alice", "timestamp": 1700000000}]},
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/carol", "value": "carol", "timestamp": 1700000000}]}
]}"#;

pub const LINK_HISTORY: &str = r#"{"link_history_link_history": [
  {"label_values": [{"label": "URL", "value": "https://a.example.com/1"}, {"label": "Start time", "timestamp_value": 1700000000}]},
  {"label_values": [{"label": "URL", "value": "https://a.example.com/2"}, {"label": "Start time", "timestamp_value": 1700000100}]}
]}"#;

pub const PERSONAL_INFORMATION: &str = r#"{"profile_user": [{"string_map_data": {
  "Username": {"value": "jane.doe"},
  "Name": {"value": "Jane Doe"},
  "Email": {"value": "jane@example.com"},
  "Private Account": {"value": "False"}
}}]}"#;

pub const CONVERSATION: &str = r#"{
  "participants": [{"name": "Sam"}, {"name": "Jane Doe"}],
  "messages": [
    {"sender_name": "Sam", "timestamp_ms": 1700000000000, "content": "hey"},
    {"sender_name": "Jane Doe", "timestamp_ms": 1700000060000, "content": "hi"}
  ],
  "title": "Sam"
}"#;

pub const LOGINS: &str = r#"{"account_history_login_history": [
  {"title": "2023-11-14T22:13:20+00:00", "string_map_data": {"IP Address": {"value": "203.0.113.7"}, "Time": {"timestamp": 1700000000}, "User Agent": {"value": "Instagram 300 Android"}}}
]}"#;

/// A small but representative export, rooted like a real download.
pub fn sample_export() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "instagram-jane/personal_information/personal_information/personal_information.json",
            PERSONAL_INFORMATION,
        ),
        (
            "instagram-jane/connections/followers_and_following/followers_1.json",
            FOLLOWERS,
        ),
        (
            "instagram-jane/connections/followers_and_following/following.json",
            FOLLOWING,
        ),
        (
            "instagram-jane/logged_information/link_history/link_history.json",
            LINK_HISTORY,
        ),
        (
            "instagram-jane/your_instagram_activity/messages/inbox/sam_42/message_1.json",
            CONVERSATION,
        ),
        (
            "instagram-jane/security_and_login_information/login_and_account_creation/login_activity.json",
            LOGINS,
        ),
        ("instagram-jane/media/posts/202311/photo.jpg", "not really a jpeg"),
        ("instagram-jane/start_here.html", "<html></html>"),
    ]
}
