use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let (settings, ignored) = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert!(ignored.is_empty());
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
        bind_addr = "0.0.0.0:9000"
        database_url = "./data/custom.db"
        max_body_bytes = 2048
    "#;
    let (settings, _) = load_settings_from(Some(file), env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.database_url, "./data/custom.db");
    assert_eq!(settings.max_body_bytes, 2048);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn environment_wins_over_file_and_prefixed_names_win_over_plain() {
    let file = r#"bind_addr = "0.0.0.0:9000""#;
    let (settings, _) = load_settings_from(
        Some(file),
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:1111"),
            ("APP__BIND_ADDR", "127.0.0.1:2222"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP__LOG_FILTER", "debug"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2222");
    assert_eq!(settings.database_url, "sqlite::memory:");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn invalid_values_are_ignored() {
    let (settings, ignored) = load_settings_from(
        Some("this is = = not toml"),
        env_from(&[("APP__MAX_BODY_BYTES", "lots")]),
    );
    assert_eq!(settings, Settings::default());
    assert_eq!(ignored.len(), 2);
    assert!(ignored[0].contains(SETTINGS_FILE));
    assert!(ignored[1].contains("APP__MAX_BODY_BYTES"));
}

#[test]
fn negative_body_limit_in_file_is_reported() {
    let (settings, ignored) = load_settings_from(Some("max_body_bytes = -5"), env_from(&[]));
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
    assert_eq!(ignored, vec!["ignoring negative max_body_bytes -5".to_string()]);
}
