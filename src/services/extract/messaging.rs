//! Direct message conversations.
//!
//! A conversation is one thread folder under the inbox. Long threads are split
//! across `message_1.json`, `message_2.json`, ... inside that folder.
//! Must run after the profile routine, the owner's display name comes from it.

use super::ExtractContext;
use crate::services::utils::json::{parse_document, records, str_field, timestamp_of, Shape};
use crate::services::utils::ranking::{add, top_n, Tally};
use crate::services::utils::time::hour_of_day;
use crate::types::report::{ExportReport, MessagesSection};
use indexmap::IndexMap;
use serde_json::Value;

const INBOX: &str = "messages/inbox/";
const MESSAGE_REQUESTS: &str = "messages/message_requests/";
const MESSAGE_SHAPES: &[Shape] = &[Shape::Key("messages")];
const UNKNOWN_PARTICIPANT: &str = "unknown";

pub fn extract_messaging(ctx: &ExtractContext, report: &mut ExportReport) {
    let own_name = report.profile.own_display_name().map(str::to_string);
    let own_name = own_name.as_deref();

    let mut section = MessagesSection::default();
    let mut per_person = Tally::new();

    for parts in threads(ctx.vfc.entries_under(INBOX)).into_values() {
        let docs: Vec<Value> = parts
            .into_iter()
            .map(|text| parse_document(Some(text)))
            .collect();
        let messages: Vec<&Value> = docs
            .iter()
            .flat_map(|doc| records(doc, MESSAGE_SHAPES))
            .collect();
        if messages.is_empty() {
            continue;
        }

        let participants = docs
            .iter()
            .map(participant_names)
            .find(|names| !names.is_empty())
            .unwrap_or_default();
        let partner = primary_participant(&participants, own_name);

        section.conversation_count += 1;
        section.total_messages += messages.len() as u64;
        add(&mut per_person, partner, messages.len() as u64);

        for message in messages {
            let sender = str_field(message, "sender_name");
            if own_name.is_some() && sender == own_name {
                section.sent += 1;
            } else {
                section.received += 1;
            }

            let seconds = timestamp_of(message.get("timestamp_ms")) / 1000;
            if let Some(hour) = hour_of_day(seconds) {
                section.hourly[hour] += 1;
            }
        }
    }

    if let Some(own) = own_name {
        per_person.shift_remove(own);
    }
    section.top_people = top_n(&per_person, ctx.config.top_n);

    section.request_count = threads(ctx.vfc.entries_under(MESSAGE_REQUESTS))
        .into_values()
        .filter(|parts| {
            parts
                .iter()
                .any(|text| !records(&parse_document(Some(*text)), MESSAGE_SHAPES).is_empty())
        })
        .count() as u64;

    log::info!(
        "Messages: {} conversations, {} messages, {} requests",
        section.conversation_count,
        section.total_messages,
        section.request_count
    );
    report.messages = section;
}

/// Conversation documents grouped by thread folder, parts in page order.
fn threads<'a>(entries: Vec<(&'a str, &'a str)>) -> IndexMap<&'a str, Vec<&'a str>> {
    let mut threads: IndexMap<&str, Vec<(u32, &str)>> = IndexMap::new();
    for (path, text) in entries {
        if !is_conversation_document(path) {
            continue;
        }
        let (folder, file_name) = path.rsplit_once('/').unwrap_or(("", path));
        threads
            .entry(folder)
            .or_default()
            .push((part_number(file_name), text));
    }

    threads
        .into_iter()
        .map(|(folder, mut parts)| {
            parts.sort_by_key(|(part, _)| *part);
            (folder, parts.into_iter().map(|(_, text)| text).collect())
        })
        .collect()
}

fn part_number(file_name: &str) -> u32 {
    file_name
        .trim_start_matches("message_")
        .trim_end_matches(".json")
        .parse()
        .unwrap_or(0)
}

fn is_conversation_document(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name.starts_with("message_") && file_name.ends_with(".json")
}

fn participant_names(doc: &Value) -> Vec<&str> {
    records(doc, &[Shape::Key("participants")])
        .iter()
        .filter_map(|participant| str_field(participant, "name"))
        .collect()
}

/// First participant other than the owner, else the first participant.
fn primary_participant<'a>(participants: &[&'a str], own_name: Option<&str>) -> &'a str {
    participants
        .iter()
        .find(|name| Some(**name) != own_name)
        .or_else(|| participants.first())
        .copied()
        .unwrap_or(UNKNOWN_PARTICIPANT)
}

#[cfg(test)]
#[path = "tests/messaging_tests.rs"]
mod tests;
