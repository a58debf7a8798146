//! Link history, searches, profile changes, location and story sticker interactions.

use super::{DocSpec, ExtractContext};
use crate::services::utils::domain::to_domain;
use crate::services::utils::json::{
    event_timestamp, first_list_href, first_list_value, label_timestamp, label_value,
    map_href, map_timestamp, map_value, map_value_any, str_field, title, Shape,
};
use crate::services::utils::ranking::{tally, top_n, Tally};
use crate::types::report::{ExportReport, LinkVisit, ProfileChange, SearchSummary};
use serde_json::Value;

const LINK_HISTORY: DocSpec = DocSpec::new(
    &["link_history/link_history.json"],
    &[
        Shape::Key("link_history_link_history"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const ACCOUNT_SEARCHES: DocSpec = DocSpec::new(
    &["recent_searches/account_searches.json"],
    &[
        Shape::Key("searches_user"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const KEYWORD_SEARCHES: DocSpec = DocSpec::new(
    &["recent_searches/word_or_phrase_searches.json"],
    &[
        Shape::Key("searches_keyword"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const HASHTAG_SEARCHES: DocSpec = DocSpec::new(
    &["recent_searches/tag_searches.json"],
    &[
        Shape::Key("searches_hashtag"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const PROFILE_CHANGES: DocSpec = DocSpec::new(
    &["personal_information/profile_changes.json"],
    &[
        Shape::Key("profile_profile_change"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const LOCATION: DocSpec = DocSpec::new(
    &[
        "information_about_you/account_based_in.json",
        "information_about_you/profile_based_in.json",
    ],
    &[
        Shape::Key("inferred_data_primary_location"),
        Shape::Key("inferred_data_profile_based_in"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

/// Story sticker documents, in the order their counts are reported on ties.
const STORY_INTERACTIONS: [(&str, DocSpec); 5] = [
    (
        "polls",
        DocSpec::new(
            &["story_sticker_interactions/polls.json"],
            &[
                Shape::Key("story_activities_polls"),
                Shape::RootArray,
                Shape::FirstArrayProperty,
            ],
        ),
    ),
    (
        "quizzes",
        DocSpec::new(
            &["story_sticker_interactions/quizzes.json"],
            &[
                Shape::Key("story_activities_quizzes"),
                Shape::RootArray,
                Shape::FirstArrayProperty,
            ],
        ),
    ),
    (
        "emoji_sliders",
        DocSpec::new(
            &["story_sticker_interactions/emoji_sliders.json"],
            &[
                Shape::Key("story_activities_emoji_sliders"),
                Shape::RootArray,
                Shape::FirstArrayProperty,
            ],
        ),
    ),
    (
        "questions",
        DocSpec::new(
            &["story_sticker_interactions/questions.json"],
            &[
                Shape::Key("story_activities_questions"),
                Shape::RootArray,
                Shape::FirstArrayProperty,
            ],
        ),
    ),
    (
        "countdowns",
        DocSpec::new(
            &["story_sticker_interactions/countdowns.json"],
            &[
                Shape::Key("story_activities_countdowns"),
                Shape::RootArray,
                Shape::FirstArrayProperty,
            ],
        ),
    ),
];

pub fn extract_logged_information(ctx: &ExtractContext, report: &mut ExportReport) {
    let limit = ctx.config.top_n;

    let visits: Vec<LinkVisit> = ctx
        .records(&LINK_HISTORY)
        .iter()
        .filter_map(link_visit)
        .collect();
    let domains = tally(visits.iter().map(|visit| visit.domain.as_str()));
    report.link_history.count = visits.len() as u64;
    report.link_history.top_domains = top_n(&domains, limit);
    report.link_history.visits = visits;

    report.searches.accounts = searches(&ctx.records(&ACCOUNT_SEARCHES), limit);
    report.searches.keywords = searches(&ctx.records(&KEYWORD_SEARCHES), limit);
    report.searches.hashtags = searches(&ctx.records(&HASHTAG_SEARCHES), limit);

    let section = &mut report.logged_information;
    section.profile_changes = ctx
        .records(&PROFILE_CHANGES)
        .iter()
        .map(profile_change)
        .collect();
    section.primary_location = ctx
        .records(&LOCATION)
        .first()
        .and_then(|item| map_value_any(item, &["City Name", "Town/city name", "Location"]))
        .unwrap_or_default()
        .to_string();

    let counts: Tally = STORY_INTERACTIONS
        .iter()
        .map(|(kind, spec)| (kind.to_string(), ctx.records(spec).len() as u64))
        .filter(|(_, count)| *count > 0)
        .collect();
    section.story_interactions = top_n(&counts, STORY_INTERACTIONS.len());

    log::info!(
        "Logged information: {} link visits, {} profile changes",
        report.link_history.count,
        report.logged_information.profile_changes.len()
    );
}

/// A visited link; rows without a URL are not visits.
fn link_visit(item: &Value) -> Option<LinkVisit> {
    let url = label_value(item, "URL")
        .or_else(|| label_value(item, "Website"))
        .or_else(|| map_value_any(item, &["URL", "Website", "Link"]))
        .or_else(|| map_href(item, "URL"))
        .or_else(|| first_list_href(item))
        .or_else(|| str_field(item, "href"))?;

    let labeled = label_timestamp(item, "Start time");
    Some(LinkVisit {
        timestamp: if labeled != 0 {
            labeled
        } else {
            event_timestamp(item)
        },
        url: url.to_string(),
        domain: to_domain(url),
    })
}

fn searches(records: &[Value], limit: usize) -> SearchSummary {
    let terms = tally(
        records
            .iter()
            .filter_map(|item| {
                map_value(item, "Search")
                    .or_else(|| first_list_value(item))
                    .or_else(|| title(item))
                    .or_else(|| label_value(item, "Search"))
            })
            .map(|term| term.to_lowercase()),
    );
    SearchSummary {
        count: records.len() as u64,
        top_terms: top_n(&terms, limit),
    }
}

fn profile_change(item: &Value) -> ProfileChange {
    let text = |label: &str| map_value(item, label).unwrap_or_default().to_string();
    ProfileChange {
        field: text("Changed"),
        previous_value: text("Previous Value"),
        new_value: text("New Value"),
        timestamp: map_timestamp(item, "Change Date"),
    }
}

#[cfg(test)]
#[path = "tests/logged_info_tests.rs"]
mod tests;
