//! Ad impressions, advertisers and the interest categories used for targeting.

use super::{DocSpec, ExtractContext};
use crate::services::utils::json::{
    event_timestamp, first_list_value, label_value, label_vec_values, map_value_any, records,
    str_field, title, Shape,
};
use crate::services::utils::ranking::{tally, top_n};
use crate::types::report::{
    AdImpression, AdvertiserSummary, ExportReport, ImpressionSummary, InteractionSummary,
};
use indexmap::IndexSet;
use serde_json::Value;

const ADS_VIEWED: DocSpec = DocSpec::new(
    &["ads_and_topics/ads_viewed.json"],
    &[
        Shape::Key("impressions_history_ads_seen"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const POSTS_VIEWED: DocSpec = DocSpec::new(
    &["ads_and_topics/posts_viewed.json"],
    &[
        Shape::Key("impressions_history_posts_seen"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const VIDEOS_WATCHED: DocSpec = DocSpec::new(
    &["ads_and_topics/videos_watched.json"],
    &[
        Shape::Key("impressions_history_videos_watched"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const SUGGESTED_PROFILES_VIEWED: DocSpec = DocSpec::new(
    &["ads_and_topics/suggested_profiles_viewed.json"],
    &[
        Shape::Key("impressions_history_chaining_seen"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const ADS_CLICKED: DocSpec = DocSpec::new(
    &["ads_and_topics/ads_clicked.json"],
    &[
        Shape::Key("impressions_history_ad_clicks"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const ADVERTISERS: DocSpec = DocSpec {
    suffixes: &["advertisers_using_your_activity_or_information.json"],
    shapes: &[
        Shape::Key("ig_custom_audiences_all_types"),
        Shape::Key("custom_audiences_all_types_v2"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const OTHER_CATEGORIES: DocSpec = DocSpec {
    suffixes: &["other_categories_used_to_reach_you.json"],
    shapes: &[
        Shape::Key("label_values"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

const ADS_INTERESTS: DocSpec = DocSpec {
    suffixes: &["ads_interests.json"],
    shapes: &[
        Shape::Key("inferred_data_ig_interest"),
        Shape::Key("topics_your_topics"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

pub fn extract_advertising(ctx: &ExtractContext, report: &mut ExportReport) {
    let limit = ctx.config.top_n;

    let ads_viewed = ctx.records(&ADS_VIEWED);
    let ads_clicked = ctx.records(&ADS_CLICKED);

    let section = &mut report.ads;
    section.ads_viewed = impressions(&ads_viewed, limit);
    section.posts_viewed = impressions(&ctx.records(&POSTS_VIEWED), limit);
    section.videos_watched = impressions(&ctx.records(&VIDEOS_WATCHED), limit);
    section.suggested_profiles_viewed =
        impressions(&ctx.records(&SUGGESTED_PROFILES_VIEWED), limit);

    let clicked = tally(ads_clicked.iter().filter_map(clicked_ad));
    section.ads_clicked = InteractionSummary {
        count: ads_clicked.len() as u64,
        top_accounts: top_n(&clicked, limit),
    };

    section.impressions = ad_events(&ads_viewed, "viewed")
        .chain(ad_events(&ads_clicked, "clicked"))
        .collect();

    section.advertisers = advertisers(&ctx.records(&ADVERTISERS));
    section.categories = categories(ctx);

    log::info!(
        "Advertising: {} ads viewed, {} advertisers, {} categories",
        section.ads_viewed.count,
        section.advertisers.count,
        section.categories.len()
    );
}

fn impressions(records: &[Value], limit: usize) -> ImpressionSummary {
    let counts = tally(records.iter().filter_map(author));
    ImpressionSummary {
        count: records.len() as u64,
        top_authors: top_n(&counts, limit),
    }
}

fn author(item: &Value) -> Option<&str> {
    map_value_any(item, &["Author", "Username", "Owner"])
        .or_else(|| label_value(item, "Author"))
        .or_else(|| title(item))
}

fn clicked_ad(item: &Value) -> Option<&str> {
    title(item)
        .or_else(|| map_value_any(item, &["Title", "Author"]))
        .or_else(|| first_list_value(item))
}

fn ad_events<'a>(
    records: &'a [Value],
    kind: &'static str,
) -> impl Iterator<Item = AdImpression> + 'a {
    records.iter().map(move |item| AdImpression {
        timestamp: event_timestamp(item),
        author: author(item).or_else(|| clicked_ad(item)).unwrap_or_default().to_string(),
        kind: kind.to_string(),
    })
}

fn advertisers(records: &[Value]) -> AdvertiserSummary {
    let mut summary = AdvertiserSummary {
        count: records.len() as u64,
        ..Default::default()
    };
    for item in records {
        if let Some(name) = str_field(item, "advertiser_name")
            .or_else(|| title(item))
            .or_else(|| map_value_any(item, &["Advertiser name", "Name"]))
        {
            summary.names.push(name.to_string());
        }
        summary.with_data_file += u64::from(flag(item, "has_data_file_custom_audience"));
        summary.with_remarketing += u64::from(flag(item, "has_remarketing_custom_audience"));
        summary.with_in_person += u64::from(flag(item, "has_in_person_store_visit"));
    }
    summary
}

fn flag(item: &Value, key: &str) -> bool {
    match item.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Targeting categories from both documents, de-duplicated in first-seen order.
fn categories(ctx: &ExtractContext) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();

    for spec in [&OTHER_CATEGORIES, &ADS_INTERESTS] {
        let Some(doc) = ctx.document(spec) else {
            continue;
        };
        for item in records(&doc, spec.shapes) {
            names.extend(category_names(item).into_iter().map(str::to_string));
        }
    }

    names.into_iter().collect()
}

/// Names carried by one category record across its known layouts.
fn category_names(item: &Value) -> Vec<&str> {
    if let Some(vec) = item.get("vec").and_then(Value::as_array) {
        return vec.iter().filter_map(|v| str_field(v, "value")).collect();
    }
    let nested = label_vec_values(item);
    if !nested.is_empty() {
        return nested;
    }
    map_value_any(item, &["Name", "Interest"])
        .or_else(|| str_field(item, "value"))
        .or_else(|| title(item))
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "tests/advertising_tests.rs"]
mod tests;
