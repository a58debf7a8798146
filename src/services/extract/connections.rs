//! Followers, following and the smaller relationship lists.

use super::{DocSpec, ExtractContext};
use crate::services::utils::json::{username_of, Shape};
use crate::types::report::{ConnectionList, ExportReport};
use indexmap::IndexSet;
use serde_json::Value;
use std::collections::HashSet;

const FOLLOWERS_STEM: &str = "followers_and_following/followers";
const FOLLOWERS_SHAPES: &[Shape] = &[
    Shape::RootArray,
    Shape::Key("relationships_followers"),
    Shape::FirstArrayProperty,
];

const FOLLOWING: DocSpec = DocSpec {
    suffixes: &["followers_and_following/following.json"],
    shapes: &[
        Shape::Key("relationships_following"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const CLOSE_FRIENDS: DocSpec = DocSpec::new(
    &["followers_and_following/close_friends.json"],
    &[
        Shape::Key("relationships_close_friends"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const BLOCKED: DocSpec = DocSpec::new(
    &[
        "followers_and_following/blocked_profiles.json",
        "followers_and_following/blocked_accounts.json",
    ],
    &[
        Shape::Key("relationships_blocked_users"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const RESTRICTED: DocSpec = DocSpec::new(
    &[
        "followers_and_following/restricted_profiles.json",
        "followers_and_following/restricted_accounts.json",
    ],
    &[
        Shape::Key("relationships_restricted_users"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const PENDING_REQUESTS: DocSpec = DocSpec::new(
    &["followers_and_following/pending_follow_requests.json"],
    &[
        Shape::Key("relationships_follow_requests_sent"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const RECENT_REQUESTS: DocSpec = DocSpec::new(
    &["followers_and_following/recent_follow_requests.json"],
    &[
        Shape::Key("relationships_permanent_follow_requests"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const REMOVED_SUGGESTIONS: DocSpec = DocSpec::new(
    &["followers_and_following/removed_suggestions.json"],
    &[
        Shape::Key("relationships_dismissed_suggested_users"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const HIDDEN_STORY_FROM: DocSpec = DocSpec::new(
    &["followers_and_following/hide_story_from.json"],
    &[
        Shape::Key("relationships_hide_stories_from"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const UNFOLLOWED_SHAPES: &[Shape] = &[
    Shape::Key("relationships_unfollowed_users"),
    Shape::RootArray,
    Shape::FirstArrayProperty,
];

/// Both places recently unfollowed profiles have been exported to, merged in this order.
const RECENTLY_UNFOLLOWED: [DocSpec; 2] = [
    DocSpec::new(
        &["connections/followers_and_following/recently_unfollowed_profiles.json"],
        UNFOLLOWED_SHAPES,
    ),
    DocSpec::new(
        &["your_instagram_activity/recently_unfollowed_profiles.json"],
        UNFOLLOWED_SHAPES,
    ),
];

pub fn extract_connections(ctx: &ExtractContext, report: &mut ExportReport) {
    let followers = usernames(&ctx.paged_records(FOLLOWERS_STEM, FOLLOWERS_SHAPES));
    let following = usernames(&ctx.records(&FOLLOWING));

    report.not_following_back = difference(&following, &followers);
    report.not_followed_back = difference(&followers, &following);
    report.mutual_count = following.len() as u64 - report.not_following_back.len() as u64;

    log::info!(
        "Connections: {} followers, {} following, {} not following back",
        followers.len(),
        following.len(),
        report.not_following_back.len()
    );

    report.followers = ConnectionList::from_usernames(followers);
    report.following = ConnectionList::from_usernames(following);

    let section = &mut report.connections;
    section.close_friends = relationship_list(ctx, &CLOSE_FRIENDS);
    section.blocked = relationship_list(ctx, &BLOCKED);
    section.restricted = relationship_list(ctx, &RESTRICTED);
    section.pending_requests = relationship_list(ctx, &PENDING_REQUESTS);
    section.recent_requests = relationship_list(ctx, &RECENT_REQUESTS);
    section.removed_suggestions = relationship_list(ctx, &REMOVED_SUGGESTIONS);
    section.hidden_story_from = relationship_list(ctx, &HIDDEN_STORY_FROM);

    let mut unfollowed = IndexSet::new();
    for spec in &RECENTLY_UNFOLLOWED {
        unfollowed.extend(usernames(&ctx.records(spec)));
    }
    section.recently_unfollowed = ConnectionList::from_usernames(unfollowed.into_iter().collect());
}

fn usernames(records: &[Value]) -> Vec<String> {
    records.iter().filter_map(username_of).collect()
}

fn relationship_list(ctx: &ExtractContext, spec: &DocSpec) -> ConnectionList {
    ConnectionList::from_usernames(usernames(&ctx.records(spec)))
}

/// Entries of `left` absent from `right`, keeping `left`'s order and duplicates.
fn difference(left: &[String], right: &[String]) -> Vec<String> {
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();
    left.iter()
        .filter(|name| !right.contains(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "tests/connections_tests.rs"]
mod tests;
