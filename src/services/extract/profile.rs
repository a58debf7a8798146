//! Account owner details from `personal_information.json`.

use super::{DocSpec, ExtractContext};
use crate::services::utils::json::{map_value, map_value_any, Shape};
use crate::types::report::{ExportReport, ProfileSection};
use serde_json::Value;

const PERSONAL_INFORMATION: DocSpec = DocSpec {
    suffixes: &["personal_information/personal_information.json"],
    shapes: &[
        Shape::Key("profile_user"),
        Shape::RootArray,
        Shape::FirstArrayProperty,
    ],
};

pub fn extract_profile(ctx: &ExtractContext, report: &mut ExportReport) {
    let records = ctx.records(&PERSONAL_INFORMATION);
    let Some(user) = records.first() else {
        log::debug!("No profile record found");
        return;
    };

    report.profile = ProfileSection {
        username: text(user, &["Username"]),
        name: text(user, &["Name"]),
        email: text(user, &["Email", "Email address"]),
        phone_number: text(user, &["Phone Number"]),
        bio: text(user, &["Bio"]),
        gender: text(user, &["Gender"]),
        date_of_birth: text(user, &["Date of birth"]),
        website: text(user, &["Website"]),
        is_private: map_value(user, "Private Account")
            .is_some_and(|value| value.eq_ignore_ascii_case("true")),
    };
}

fn text(user: &Value, labels: &[&str]) -> String {
    map_value_any(user, labels).unwrap_or_default().to_string()
}

#[cfg(test)]
#[path = "tests/profile_tests.rs"]
mod tests;
