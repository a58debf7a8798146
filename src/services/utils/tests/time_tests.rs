use super::*;

// 2024-01-15T10:30:00Z
const JAN_15: i64 = 1_705_314_600;
// 2024-02-01T00:00:00Z
const FEB_1: i64 = 1_706_745_600;

#[test]
fn test_month_key_and_hour() {
    assert_eq!(month_key(JAN_15).as_deref(), Some("2024-01"));
    assert_eq!(hour_of_day(JAN_15), Some(10));
    assert_eq!(month_key(0), None);
    assert_eq!(hour_of_day(-5), None);
}

#[test]
fn test_parse_rfc3339() {
    assert_eq!(parse_rfc3339("2024-01-15T10:30:00+00:00"), JAN_15);
    assert_eq!(parse_rfc3339("yesterday"), 0);
}

#[test]
fn test_monthly_series_is_chronological() {
    let series = monthly_series([FEB_1, JAN_15, 0, JAN_15]);

    assert_eq!(
        series,
        vec![
            MonthlyCount {
                month: "2024-01".into(),
                count: 2
            },
            MonthlyCount {
                month: "2024-02".into(),
                count: 1
            },
        ]
    );
}
