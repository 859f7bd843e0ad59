use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = AppConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.certificate.name.y, 780.0);
    assert_eq!(cfg.certificate.amount.y, 850.0);
    assert_eq!(cfg.certificate.amount.color, Rgb8::new(192, 57, 43));
    assert_eq!(cfg.certificate.script_hint.as_deref(), Some("km"));
    assert!(cfg.sheets.is_none());
}

#[test]
fn sheets_defaults_fill_in() {
    let cfg =
        AppConfig::from_reader(r#"{"sheets": {"spreadsheet_id": "abc"}}"#.as_bytes()).unwrap();
    let sheets = cfg.sheets.unwrap();
    assert_eq!(sheets, SheetsConfig::new("abc"));
    assert_eq!(sheets.range, "Sheet1!A:D");
    assert_eq!(sheets.token_env, "DONORCERT_SHEETS_TOKEN");
}

#[test]
fn rejects_non_positive_font_size() {
    let json = r#"{"certificate": {"name": {"y": 10, "size_px": 0, "color": [0, 0, 0]}}}"#;
    let err = AppConfig::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("name.size_px"));
}

#[test]
fn rejects_unknown_fields() {
    let err = AppConfig::from_reader(r#"{"certificat": {}}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, CertError::Config(_)));
}

#[test]
fn rejects_blank_spreadsheet_id() {
    let err = AppConfig::from_reader(r#"{"sheets": {"spreadsheet_id": " "}}"#.as_bytes())
        .unwrap_err();
    assert!(err.to_string().contains("spreadsheet_id"));
}

#[test]
fn from_path_resolves_assets_relative_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("donorcert.json");
    std::fs::write(
        &cfg_path,
        r#"{"certificate": {"template_path": "assets/t.png", "font_path": "/abs/f.ttf"}}"#,
    )
    .unwrap();

    let cfg = AppConfig::from_path(&cfg_path).unwrap();
    assert_eq!(
        cfg.certificate.template_path,
        dir.path().join("assets/t.png")
    );
    assert_eq!(
        cfg.certificate.font_path.as_deref(),
        Some(Path::new("/abs/f.ttf"))
    );
}

#[test]
fn from_path_missing_file_is_config_error() {
    let err = AppConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CertError::Config(_)));
}
