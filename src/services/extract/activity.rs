//! Likes, comments, saves and the account's own content.

use super::{DocSpec, ExtractContext};
use crate::services::utils::json::{
    event_timestamp, map_value_any, timestamp_of, title, Shape,
};
use crate::services::utils::ranking::{tally, top_n};
use crate::services::utils::time::monthly_series;
use crate::types::report::{ContentSummary, ExportReport, InteractionSummary};
use serde_json::Value;

const LIKED_POSTS: DocSpec = DocSpec {
    suffixes: &["likes/liked_posts.json"],
    shapes: &[
        Shape::Key("likes_media_likes"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const LIKED_COMMENTS: DocSpec = DocSpec {
    suffixes: &["likes/liked_comments.json"],
    shapes: &[
        Shape::Key("likes_comment_likes"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const POST_COMMENTS_STEM: &str = "comments/post_comments";
const POST_COMMENTS_SHAPES: &[Shape] = &[
    Shape::RootArray,
    Shape::Key("comments_media_comments"),
    Shape::FirstArrayProperty,
];

const REELS_COMMENTS: DocSpec = DocSpec {
    suffixes: &["comments/reels_comments.json"],
    shapes: &[
        Shape::Key("comments_reels_comments"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const SAVED_POSTS: DocSpec = DocSpec {
    suffixes: &["saved/saved_posts.json"],
    shapes: &[
        Shape::Key("saved_saved_media"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const STORY_LIKES: DocSpec = DocSpec {
    suffixes: &[
        "story_sticker_interactions/story_likes.json",
        "story_interactions/story_likes.json",
    ],
    shapes: &[
        Shape::Key("story_activities_story_likes"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const POSTS_STEM: &str = "content/posts";
const POSTS_SHAPES: &[Shape] = &[
    Shape::RootArray,
    Shape::Key("ig_posts"),
    Shape::FirstArrayProperty,
];

const STORIES: DocSpec = DocSpec {
    suffixes: &["content/stories.json"],
    shapes: &[
        Shape::Key("ig_stories"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const REELS: DocSpec = DocSpec {
    suffixes: &["content/reels.json"],
    shapes: &[
        Shape::Key("ig_reels_media"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

pub fn extract_activity(ctx: &ExtractContext, report: &mut ExportReport) {
    let limit = ctx.config.top_n;

    let liked_posts = ctx.records(&LIKED_POSTS);
    let liked_comments = ctx.records(&LIKED_COMMENTS);
    let mut comments = ctx.paged_records(POST_COMMENTS_STEM, POST_COMMENTS_SHAPES);
    comments.extend(ctx.records(&REELS_COMMENTS));
    let saved = ctx.records(&SAVED_POSTS);
    let story_likes = ctx.records(&STORY_LIKES);

    let posts = ctx.paged_records(POSTS_STEM, POSTS_SHAPES);
    let stories = ctx.records(&STORIES);
    let reels = ctx.records(&REELS);

    let section = &mut report.activity;
    section.liked_posts = interactions(&liked_posts, liked_account, limit);
    section.liked_comments = interactions(&liked_comments, liked_account, limit);
    section.comments = interactions(&comments, comment_owner, limit);
    section.saved_posts = interactions(&saved, liked_account, limit);
    section.story_likes = interactions(&story_likes, liked_account, limit);
    section.posts = content(&posts);
    section.stories = content(&stories);
    section.reels = content(&reels);

    let interaction_times = [&liked_posts, &liked_comments, &comments, &saved, &story_likes]
        .into_iter()
        .flatten()
        .map(event_timestamp);
    let content_times = [&posts, &stories, &reels]
        .into_iter()
        .flatten()
        .map(content_timestamp);
    section.monthly = monthly_series(interaction_times.chain(content_times));

    log::info!(
        "Activity: {} liked posts, {} comments, {} posts",
        section.liked_posts.count,
        section.comments.count,
        section.posts.count
    );
}

fn interactions(
    records: &[Value],
    account: fn(&Value) -> Option<&str>,
    limit: usize,
) -> InteractionSummary {
    let counts = tally(
        records
            .iter()
            .filter_map(account)
            .map(|name| name.to_lowercase()),
    );
    InteractionSummary {
        count: records.len() as u64,
        top_accounts: top_n(&counts, limit),
    }
}

/// Owner of a liked, saved or story item: `title` in every known layout.
fn liked_account(item: &Value) -> Option<&str> {
    title(item).or_else(|| map_value_any(item, &["Media Owner", "Username", "Owner"]))
}

fn comment_owner(item: &Value) -> Option<&str> {
    map_value_any(item, &["Media Owner", "Owner"]).or_else(|| title(item))
}

fn content(records: &[Value]) -> ContentSummary {
    ContentSummary {
        count: records.len() as u64,
        media_count: records.iter().map(media_count).sum(),
    }
}

/// Posts and reels group several media under `media`; a story item is one medium.
fn media_count(item: &Value) -> u64 {
    match item.get("media").and_then(Value::as_array) {
        Some(media) => media.len() as u64,
        None => 1,
    }
}

fn content_timestamp(item: &Value) -> i64 {
    let own = timestamp_of(item.get("creation_timestamp"));
    if own != 0 {
        return own;
    }
    item.get("media")
        .and_then(Value::as_array)
        .and_then(|media| media.first())
        .map(|first| timestamp_of(first.get("creation_timestamp")))
        .filter(|ts| *ts != 0)
        .unwrap_or_else(|| event_timestamp(item))
}

#[cfg(test)]
#[path = "tests/activity_tests.rs"]
mod tests;
