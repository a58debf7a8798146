use super::*;
use crate::services::config::IngestConfig;
use crate::test_utils::vfc_from;
use crate::types::report::RankedEntry;

fn run(entries: &[(&str, &str)]) -> ExportReport {
    let vfc = vfc_from(entries);
    let config = IngestConfig::default();
    let mut report = ExportReport::template();
    extract_advertising(&ExtractContext::new(&vfc, &config), &mut report);
    report
}

const ADS_VIEWED_DOC: &str = r#"{"impressions_history_ads_seen": [
    {"string_map_data": {"Author": {"value": "shoeshop"}, "Time": {"timestamp": 1700000000}}},
    {"string_map_data": {"Author": {"value": "shoeshop"}, "Time": {"timestamp": 1700000100}}},
    {"string_map_data": {"Author": {"value": "travelco"}, "Time": {"timestamp": 1700000200}}},
    {"string_map_data": {"Time": {"timestamp": 1700000300}}}
]}"#;

#[test]
fn test_ads_viewed_ranks_authors_and_records_impressions() {
    let clicked = r#"{"impressions_history_ad_clicks": [
        {"title": "Summer sale", "string_list_data": [{"timestamp": 1700000400}]}
    ]}"#;

    let report = run(&[
        ("ads_information/ads_and_topics/ads_viewed.json", ADS_VIEWED_DOC),
        ("ads_information/ads_and_topics/ads_clicked.json", clicked),
    ]);

    let ads = &report.ads;
    assert_eq!(ads.ads_viewed.count, 4);
    assert_eq!(
        ads.ads_viewed.top_authors,
        vec![RankedEntry::new("shoeshop", 2), RankedEntry::new("travelco", 1)]
    );
    assert_eq!(ads.ads_clicked.count, 1);
    assert_eq!(ads.ads_clicked.top_accounts[0].key, "Summer sale");

    assert_eq!(ads.impressions.len(), 5);
    assert_eq!(ads.impressions[0].author, "shoeshop");
    assert_eq!(ads.impressions[0].kind, "viewed");
    assert_eq!(ads.impressions[3].author, "");
    assert_eq!(ads.impressions[4].kind, "clicked");
    assert_eq!(ads.impressions[4].timestamp, 1_700_000_400);
}

#[test]
fn test_advertisers_count_flags() {
    let doc = r#"{"ig_custom_audiences_all_types": [
        {"advertiser_name": "Acme", "has_data_file_custom_audience": true, "has_remarketing_custom_audience": false, "has_in_person_store_visit": false},
        {"advertiser_name": "Globex", "has_data_file_custom_audience": true, "has_remarketing_custom_audience": true, "has_in_person_store_visit": "true"}
    ]}"#;

    let report = run(&[(
        "instagram_ads_and_businesses/advertisers_using_your_activity_or_information.json",
        doc,
    )]);

    let advertisers = &report.ads.advertisers;
    assert_eq!(advertisers.count, 2);
    assert_eq!(advertisers.names, vec!["Acme", "Globex"]);
    assert_eq!(advertisers.with_data_file, 2);
    assert_eq!(advertisers.with_remarketing, 1);
    assert_eq!(advertisers.with_in_person, 1);
}

#[test]
fn test_categories_merge_both_documents_without_duplicates() {
    let other = r#"{"label_values": [
        {"label": "Name", "vec": [{"value": "Travel"}, {"value": "Coffee"}]}
    ]}"#;
    let interests = r#"{"inferred_data_ig_interest": [
        {"string_map_data": {"Interest": {"value": "Coffee"}}},
        {"string_map_data": {"Interest": {"value": "Hiking"}}}
    ]}"#;

    let report = run(&[
        ("instagram_ads_and_businesses/other_categories_used_to_reach_you.json", other),
        ("information_about_you/ads_interests.json", interests),
    ]);

    assert_eq!(report.ads.categories, vec!["Travel", "Coffee", "Hiking"]);
}

#[test]
fn test_unknown_shape_falls_back_to_first_array_property() {
    let doc = r#"{"version": 3, "renamed_ads_key": [{"title": "x"}, {"title": "x"}]}"#;

    let report = run(&[("ads_and_topics/posts_viewed.json", doc)]);

    assert_eq!(report.ads.posts_viewed.count, 2);
    assert_eq!(report.ads.posts_viewed.top_authors, vec![RankedEntry::new("x", 2)]);
}
