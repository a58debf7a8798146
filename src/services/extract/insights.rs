//! Content insights, audience, topics, devices and connected apps.

use super::{DocSpec, ExtractContext};
use crate::services::utils::json::{
    label_vec_values, map_number, map_pairs, map_timestamp, map_timestamp_any, map_value,
    map_value_any, str_field, timestamp_of, title, Shape,
};
use crate::services::utils::numbers::average;
use crate::types::report::{
    AppsSection, Device, DevicesSection, ExportReport, InsightRow, LabeledValue, MetricSummary,
    MetricTotal,
};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

pub const POST_METRICS: &[&str] = &["Impressions", "Reach", "Likes", "Comments", "Saves", "Shares"];
pub const REEL_METRICS: &[&str] = &["Plays", "Reach", "Likes", "Comments", "Saves", "Shares"];
pub const STORY_METRICS: &[&str] = &[
    "Impressions",
    "Reach",
    "Replies",
    "Exits",
    "Taps Forward",
    "Taps Back",
];

const POST_INSIGHTS: DocSpec = DocSpec::new(
    &["past_instagram_insights/posts.json"],
    &[
        Shape::Key("organic_insights_posts"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const REEL_INSIGHTS: DocSpec = DocSpec::new(
    &["past_instagram_insights/reels.json"],
    &[
        Shape::Key("organic_insights_reels"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const STORY_INSIGHTS: DocSpec = DocSpec::new(
    &["past_instagram_insights/stories.json"],
    &[
        Shape::Key("organic_insights_stories"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const AUDIENCE: DocSpec = DocSpec::new(
    &["past_instagram_insights/audience_insights.json"],
    &[
        Shape::Key("organic_insights_audience"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const TOPICS: DocSpec = DocSpec::new(
    &["your_topics/your_topics.json", "your_topics/recommended_topics.json"],
    &[
        Shape::Key("topics_your_topics"),
        Shape::Key("topics_value"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const DEVICES: DocSpec = DocSpec::new(
    &["device_information/devices.json"],
    &[
        Shape::Key("devices_devices"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const ACTIVE_APPS: DocSpec = DocSpec::new(
    &["apps_and_websites/active_apps_and_websites.json"],
    &[
        Shape::Key("apps_and_websites_active_apps_and_websites"),
        Shape::Key("active_apps"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const EXPIRED_APPS: DocSpec = DocSpec::new(
    &["apps_and_websites/expired_apps_and_websites.json"],
    &[
        Shape::Key("apps_and_websites_expired_apps_and_websites"),
        Shape::Key("expired_apps"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

/// Insights, preferences, devices and apps, in that order.
pub fn extract_insights(ctx: &ExtractContext, report: &mut ExportReport) {
    let section = &mut report.insights;
    section.posts = summarize_metrics(&ctx.records(&POST_INSIGHTS), POST_METRICS);
    section.reels = summarize_metrics(&ctx.records(&REEL_INSIGHTS), REEL_METRICS);
    section.stories = summarize_metrics(&ctx.records(&STORY_INSIGHTS), STORY_METRICS);
    section.audience = ctx
        .records(&AUDIENCE)
        .iter()
        .flat_map(map_pairs)
        .map(|(label, value)| LabeledValue { label, value })
        .collect();

    report.preferences.topics = topics(&ctx.records(&TOPICS));
    report.devices = devices(&ctx.records(&DEVICES));

    let active = app_names(&ctx.records(&ACTIVE_APPS));
    let expired = app_names(&ctx.records(&EXPIRED_APPS));
    report.apps = AppsSection {
        active_count: active.len() as u64,
        expired_count: expired.len() as u64,
        active,
        expired,
    };

    log::info!(
        "Insights: {} posts, {} reels, {} stories, {} devices",
        report.insights.posts.count,
        report.insights.reels.count,
        report.insights.stories.count,
        report.devices.count
    );
}

/// Per-row metric values plus totals and averages over all rows.
///
/// No rows yields the empty summary, not one zeroed total per metric.
pub fn summarize_metrics(records: &[Value], metrics: &[&str]) -> MetricSummary {
    if records.is_empty() {
        return MetricSummary::default();
    }

    let rows: Vec<InsightRow> = records
        .iter()
        .map(|item| InsightRow {
            timestamp: row_timestamp(item),
            metrics: metrics
                .iter()
                .map(|metric| (metric.to_string(), map_number(item, metric)))
                .collect::<IndexMap<_, _>>(),
        })
        .collect();

    let count = rows.len() as u64;
    let totals = metrics
        .iter()
        .map(|metric| {
            let total = rows
                .iter()
                .map(|row| row.metrics.get(*metric).copied().unwrap_or(0))
                .fold(0i64, i64::saturating_add);
            MetricTotal {
                metric: metric.to_string(),
                total,
                average: average(total, count),
            }
        })
        .collect();

    MetricSummary {
        count,
        totals,
        rows,
    }
}

fn row_timestamp(item: &Value) -> i64 {
    let ts = map_timestamp_any(item, &["Creation Timestamp", "Upload Timestamp", "Time"]);
    if ts != 0 {
        return ts;
    }
    timestamp_of(item.get("creation_timestamp"))
}

fn topics(records: &[Value]) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();
    for item in records {
        let nested = label_vec_values(item);
        if !nested.is_empty() {
            names.extend(nested.into_iter().map(str::to_string));
        } else if let Some(name) = map_value_any(item, &["Name", "Topic"])
            .or_else(|| str_field(item, "value"))
            .or_else(|| title(item))
        {
            names.insert(name.to_string());
        }
    }
    names.into_iter().collect()
}

fn devices(records: &[Value]) -> DevicesSection {
    let devices: Vec<Device> = records
        .iter()
        .map(|item| Device {
            user_agent: map_value(item, "User Agent")
                .or_else(|| title(item))
                .unwrap_or_default()
                .to_string(),
            last_login: map_timestamp(item, "Last Login"),
        })
        .collect();
    DevicesSection {
        count: devices.len() as u64,
        devices,
    }
}

fn app_names(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|item| {
            title(item)
                .or_else(|| str_field(item, "name"))
                .or_else(|| map_value_any(item, &["Name", "App Name"]))
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/insights_tests.rs"]
mod tests;
