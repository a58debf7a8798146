//! Aggregate report produced by one ingestion run.
//!
//! Every section defaults to empty lists and zero counts so a missing source
//! document leaves its section exactly at the template value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One row of a descending top-N ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Event count for one calendar month (`YYYY-MM`, UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSection {
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub bio: String,
    pub gender: String,
    pub date_of_birth: String,
    pub website: String,
    pub is_private: bool,
}

impl ProfileSection {
    /// Display name used by the account in conversations, falling back to the username.
    pub fn own_display_name(&self) -> Option<&str> {
        if !self.name.is_empty() {
            Some(self.name.as_str())
        } else if !self.username.is_empty() {
            Some(self.username.as_str())
        } else {
            None
        }
    }
}

/// A list of lower-cased usernames with its length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionList {
    pub count: u64,
    pub usernames: Vec<String>,
}

impl ConnectionList {
    pub fn from_usernames(usernames: Vec<String>) -> Self {
        Self {
            count: usernames.len() as u64,
            usernames,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsSection {
    pub close_friends: ConnectionList,
    pub blocked: ConnectionList,
    pub restricted: ConnectionList,
    pub pending_requests: ConnectionList,
    pub recent_requests: ConnectionList,
    pub removed_suggestions: ConnectionList,
    pub hidden_story_from: ConnectionList,
    pub recently_unfollowed: ConnectionList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSummary {
    pub count: u64,
    pub top_accounts: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub count: u64,
    pub media_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySection {
    pub liked_posts: InteractionSummary,
    pub liked_comments: InteractionSummary,
    pub comments: InteractionSummary,
    pub saved_posts: InteractionSummary,
    pub story_likes: InteractionSummary,
    pub posts: ContentSummary,
    pub stories: ContentSummary,
    pub reels: ContentSummary,
    pub monthly: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionSummary {
    pub count: u64,
    pub top_authors: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserSummary {
    pub count: u64,
    pub names: Vec<String>,
    pub with_data_file: u64,
    pub with_remarketing: u64,
    pub with_in_person: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdImpression {
    pub timestamp: i64,
    pub author: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsSection {
    pub ads_viewed: ImpressionSummary,
    pub posts_viewed: ImpressionSummary,
    pub videos_watched: ImpressionSummary,
    pub suggested_profiles_viewed: ImpressionSummary,
    pub ads_clicked: InteractionSummary,
    pub advertisers: AdvertiserSummary,
    pub categories: Vec<String>,
    pub impressions: Vec<AdImpression>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEvent {
    pub timestamp: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySection {
    pub login_count: u64,
    pub logout_count: u64,
    pub password_change_count: u64,
    pub unique_ips: Vec<String>,
    pub top_ips: Vec<RankedEntry>,
    pub top_user_agents: Vec<RankedEntry>,
    pub last_login: i64,
    pub account_created: i64,
    pub events: Vec<LoginEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesSection {
    pub conversation_count: u64,
    pub request_count: u64,
    pub total_messages: u64,
    pub sent: u64,
    pub received: u64,
    pub top_people: Vec<RankedEntry>,
    /// Messages per UTC hour of day, always 24 buckets.
    pub hourly: Vec<u64>,
}

impl Default for MessagesSection {
    fn default() -> Self {
        Self {
            conversation_count: 0,
            request_count: 0,
            total_messages: 0,
            sent: 0,
            received: 0,
            top_people: Vec::new(),
            hourly: vec![0; 24],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTotal {
    pub metric: String,
    pub total: i64,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRow {
    pub timestamp: i64,
    pub metrics: IndexMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub count: u64,
    pub totals: Vec<MetricTotal>,
    pub rows: Vec<InsightRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSection {
    pub posts: MetricSummary,
    pub reels: MetricSummary,
    pub stories: MetricSummary,
    pub audience: Vec<LabeledValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSection {
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub user_agent: String,
    pub last_login: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesSection {
    pub count: u64,
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppsSection {
    pub active_count: u64,
    pub expired_count: u64,
    pub active: Vec<String>,
    pub expired: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkVisit {
    pub timestamp: i64,
    pub url: String,
    pub domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkHistorySection {
    pub count: u64,
    pub top_domains: Vec<RankedEntry>,
    pub visits: Vec<LinkVisit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub count: u64,
    pub top_terms: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchesSection {
    pub accounts: SearchSummary,
    pub keywords: SearchSummary,
    pub hashtags: SearchSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChange {
    pub field: String,
    pub previous_value: String,
    pub new_value: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInformationSection {
    pub profile_changes: Vec<ProfileChange>,
    pub primary_location: String,
    pub story_interactions: Vec<RankedEntry>,
}

/// The consolidated report. Plain data, safe to serialize for a display layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub profile: ProfileSection,
    pub followers: ConnectionList,
    pub following: ConnectionList,
    /// Accounts followed by the owner that do not follow back.
    pub not_following_back: Vec<String>,
    /// Followers the owner does not follow back.
    pub not_followed_back: Vec<String>,
    pub mutual_count: u64,
    pub connections: ConnectionsSection,
    pub activity: ActivitySection,
    pub ads: AdsSection,
    pub security: SecuritySection,
    pub messages: MessagesSection,
    pub insights: InsightsSection,
    pub preferences: PreferencesSection,
    pub devices: DevicesSection,
    pub apps: AppsSection,
    pub link_history: LinkHistorySection,
    pub searches: SearchesSection,
    pub logged_information: LoggedInformationSection,
}

impl ExportReport {
    /// Fresh, fully defaulted report. Build a new one for every run.
    pub fn template() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
