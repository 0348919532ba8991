use std::fs;

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "record_server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub database_url: String,
    pub log_filter: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8480".into(),
            database_url: storage::DEFAULT_DATABASE_URL.into(),
            log_filter: "info".into(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Defaults, then `record_server.toml` from the working directory, then
/// environment variables. Values that were ignored come back as messages so
/// they can be logged once tracing is set up.
pub fn load_settings() -> (Settings, Vec<String>) {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut ignored = Vec::new();

    if let Some(raw) = file_contents {
        match raw.parse::<toml::Table>() {
            Ok(table) => apply_file(&mut settings, &table, &mut ignored),
            Err(err) => ignored.push(format!("ignoring unparsable {SETTINGS_FILE}: {err}")),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__MAX_BODY_BYTES") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.max_body_bytes = parsed,
            Err(err) => ignored.push(format!("ignoring invalid APP__MAX_BODY_BYTES '{v}': {err}")),
        }
    }

    (settings, ignored)
}

fn apply_file(settings: &mut Settings, table: &toml::Table, ignored: &mut Vec<String>) {
    if let Some(v) = table.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = table.get("database_url").and_then(toml::Value::as_str) {
        settings.database_url = v.to_string();
    }
    if let Some(v) = table.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    if let Some(v) = table.get("max_body_bytes").and_then(toml::Value::as_integer) {
        match usize::try_from(v) {
            Ok(parsed) => settings.max_body_bytes = parsed,
            Err(_) => ignored.push(format!("ignoring negative max_body_bytes {v}")),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
