//! Login history, password changes and account creation.

use super::{DocSpec, ExtractContext};
use crate::services::utils::json::{map_timestamp_any, map_value_any, title, Shape};
use crate::services::utils::ranking::{tally, top_n};
use crate::services::utils::time::parse_rfc3339;
use crate::types::report::{ExportReport, LoginEvent};
use indexmap::IndexSet;
use serde_json::Value;

const LOGINS: DocSpec = DocSpec::new(
    &["login_and_account_creation/login_activity.json"],
    &[
        Shape::Key("account_history_login_history"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const LOGOUTS: DocSpec = DocSpec::new(
    &["login_and_account_creation/logout_activity.json"],
    &[
        Shape::Key("account_history_logout_history"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const PASSWORD_CHANGES: DocSpec = DocSpec::new(
    &["login_and_account_creation/password_change_activity.json"],
    &[
        Shape::Key("account_history_password_change_history"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

const SIGNUP: DocSpec = DocSpec::new(
    &[
        "login_and_account_creation/signup_information.json",
        "login_and_account_creation/signup_details.json",
    ],
    &[
        Shape::Key("account_history_registration_info"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
);

pub fn extract_security(ctx: &ExtractContext, report: &mut ExportReport) {
    let limit = ctx.config.security_top_n;

    let logins: Vec<LoginEvent> = ctx
        .records(&LOGINS)
        .iter()
        .map(|item| login_event(item, "login"))
        .collect();
    let logouts: Vec<LoginEvent> = ctx
        .records(&LOGOUTS)
        .iter()
        .map(|item| login_event(item, "logout"))
        .collect();

    let section = &mut report.security;
    section.login_count = logins.len() as u64;
    section.logout_count = logouts.len() as u64;
    section.password_change_count = ctx.records(&PASSWORD_CHANGES).len() as u64;

    let ips = logins
        .iter()
        .map(|event| event.ip_address.as_str())
        .filter(|ip| !ip.is_empty());
    section.unique_ips = ips
        .clone()
        .map(str::to_string)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();
    section.top_ips = top_n(&tally(ips), limit);
    section.top_user_agents = top_n(
        &tally(
            logins
                .iter()
                .map(|event| event.user_agent.as_str())
                .filter(|agent| !agent.is_empty()),
        ),
        limit,
    );
    section.last_login = logins.iter().map(|event| event.timestamp).max().unwrap_or(0);
    section.account_created = ctx
        .records(&SIGNUP)
        .first()
        .map(event_time)
        .unwrap_or(0);

    let mut events = logins;
    events.extend(logouts);
    // Newest first; equal timestamps keep document order.
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    section.events = events;

    log::info!(
        "Security: {} logins from {} addresses",
        section.login_count,
        section.unique_ips.len()
    );
}

fn login_event(item: &Value, kind: &str) -> LoginEvent {
    LoginEvent {
        timestamp: event_time(item),
        ip_address: map_value_any(item, &["IP Address", "IP address"])
            .unwrap_or_default()
            .to_string(),
        user_agent: map_value_any(item, &["User Agent", "Device"])
            .unwrap_or_default()
            .to_string(),
        kind: kind.to_string(),
    }
}

/// Numeric `Time` first, then an RFC 3339 `title`.
fn event_time(item: &Value) -> i64 {
    let ts = map_timestamp_any(item, &["Time", "Timestamp"]);
    if ts != 0 {
        return ts;
    }
    title(item).map(parse_rfc3339).unwrap_or(0)
}

#[cfg(test)]
#[path = "tests/security_tests.rs"]
mod tests;
