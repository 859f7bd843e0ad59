use chrono::TimeZone;

use super::*;

fn record() -> DonationRecord {
    DonationRecord {
        timestamp: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        donor_name: "លោក សុខ".to_string(),
        amount: 1000.5,
        currency: Currency::Usd,
    }
}

#[test]
fn row_has_timestamp_name_amount_label() {
    let row = record().to_row();
    assert_eq!(row[0], "2024-03-09 14:05:07");
    assert_eq!(row[1], "លោក សុខ");
    assert_eq!(row[2], 1000.5);
    assert_eq!(row[3], "ដុល្លារ ($)");
}

#[test]
fn noop_log_accepts_and_reports_disabled() {
    let mut log = NoopLog;
    assert!(!log.is_enabled());
    assert_eq!(log.name(), "noop");
    log.append(&record()).unwrap();
}
