use super::*;
use crate::test_utils::{init_test_logger, vfc_from};

#[test]
fn test_ingest_state_cancellation() {
    let state = IngestState::new();
    assert!(!state.is_cancelled());

    state.cancel();
    assert!(state.is_cancelled());

    state.reset();
    assert!(!state.is_cancelled());
}

#[test]
fn test_stage_progress_then_terminal_signal() {
    init_test_logger();
    let vfc = Vfc::new();
    let mut events = Vec::new();

    let report = run_extraction(
        &vfc,
        &IngestConfig::default(),
        &IngestState::new(),
        &mut |p| events.push(p),
    )
    .unwrap();

    assert_eq!(report, ExportReport::template());
    assert_eq!(events.len(), Stage::ORDER.len() + 1);

    let stage_messages: Vec<&str> = events[..Stage::ORDER.len()]
        .iter()
        .map(|p| {
            assert_eq!(p.fraction, None);
            p.message.as_str()
        })
        .collect();
    let expected: Vec<&str> = Stage::ORDER.iter().map(|s| s.message()).collect();
    assert_eq!(stage_messages, expected);
    assert_eq!(events.last().unwrap().fraction, Some(1.0));
}

#[test]
fn test_cancelled_run_returns_no_report() {
    let state = IngestState::new();
    state.cancel();
    let mut events = Vec::new();

    let result = run_extraction(
        &Vfc::new(),
        &IngestConfig::default(),
        &state,
        &mut |p| events.push(p),
    );

    assert!(matches!(result, Err(IngestError::Cancelled)));
    assert!(events.is_empty());
}

#[test]
fn test_cancel_during_run_stops_at_next_stage() {
    let state = IngestState::new();
    let mut seen = 0;

    let result = run_extraction(
        &Vfc::new(),
        &IngestConfig::default(),
        &state,
        &mut |_| {
            seen += 1;
            if seen == 3 {
                state.cancel();
            }
        },
    );

    assert!(matches!(result, Err(IngestError::Cancelled)));
    assert_eq!(seen, 3);
}

#[test]
fn test_messaging_sees_profile_from_earlier_stage() {
    let profile = r#"{"profile_user": [{"string_map_data": {
        "Username": {"value": "jane.doe"}, "Name": {"value": "Jane"}
    }}]}"#;
    let chat = r#"{"participants": [{"name": "Jane"}, {"name": "Sam"}],
        "messages": [{"sender_name": "Jane", "timestamp_ms": 1700000000000},
                     {"sender_name": "Sam", "timestamp_ms": 1700000000000}]}"#;
    let vfc = vfc_from(&[
        ("personal_information/personal_information/personal_information.json", profile),
        ("your_instagram_activity/messages/inbox/sam_1/message_1.json", chat),
    ]);

    let report = run_extraction(
        &vfc,
        &IngestConfig::default(),
        &IngestState::new(),
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(report.messages.sent, 1);
    assert_eq!(report.messages.received, 1);
    assert_eq!(report.messages.top_people.len(), 1);
    assert_eq!(report.messages.top_people[0].key, "Sam");
}
