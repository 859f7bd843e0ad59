use super::*;

#[test]
fn append_url_encodes_range() {
    let mut cfg = SheetsConfig::new("sheet-123");
    cfg.endpoint = "http://127.0.0.1:9/".to_string();
    cfg.range = "Donors 2024!A:D".to_string();
    let log = SheetsLog::new(cfg).unwrap();
    assert_eq!(
        log.append_url().as_str(),
        "http://127.0.0.1:9/v4/spreadsheets/sheet-123/values/Donors%202024!A:D:append?valueInputOption=USER_ENTERED"
    );
}

#[test]
fn append_url_encodes_utf8_and_slashes_in_range() {
    let mut cfg = SheetsConfig::new("sheet-123");
    cfg.range = "ក/x!A:D".to_string();
    let url = build_append_url(&cfg).unwrap();
    assert_eq!(
        url.path(),
        "/v4/spreadsheets/sheet-123/values/%E1%9E%80%2Fx!A:D:append"
    );
    assert_eq!(url.query(), Some("valueInputOption=USER_ENTERED"));
}

#[test]
fn unusable_endpoint_is_config_error() {
    for endpoint in ["not a url", "mailto:someone@example.org"] {
        let mut cfg = SheetsConfig::new("sheet-123");
        cfg.endpoint = endpoint.to_string();
        assert!(
            matches!(SheetsLog::new(cfg), Err(CertError::Config(_))),
            "{endpoint}"
        );
    }
}

#[test]
fn missing_token_is_persistence_error() {
    let mut cfg = SheetsConfig::new("sheet-123");
    cfg.token_env = "DONORCERT_TEST_TOKEN_THAT_IS_NEVER_SET".to_string();
    let log = SheetsLog::new(cfg).unwrap();
    let err = log.token().unwrap_err();
    assert!(
        matches!(err, CertError::Persistence(msg) if msg.contains("DONORCERT_TEST_TOKEN_THAT_IS_NEVER_SET"))
    );
}

#[test]
fn new_rejects_invalid_config() {
    assert!(SheetsLog::new(SheetsConfig::new("")).is_err());
}

#[test]
fn host_supplied_token_wins_over_environment() {
    let mut cfg = SheetsConfig::new("sheet-123");
    cfg.token_env = "DONORCERT_TEST_TOKEN_THAT_IS_NEVER_SET".to_string();
    let log = SheetsLog::with_token(cfg.clone(), "abc").unwrap();
    assert_eq!(log.token().unwrap(), "abc");

    let blank = SheetsLog::with_token(cfg, "  ").unwrap();
    assert!(matches!(blank.token(), Err(CertError::Persistence(_))));
}
