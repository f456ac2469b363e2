//! Resolution of `TodosSettings` from `todos.json` and `TODOS_*` variables.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::TodosSettings;

/// Default settings file, relative to the working directory.
pub fn settings_path() -> PathBuf {
    PathBuf::from("todos.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TodosSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path`, then apply `TODOS_*` overrides.
///
/// A missing file yields the defaults. Keys present in the file replace
/// the defaults section by section; `null` keeps the default.
pub fn load_settings_from_path(path: &Path) -> Result<TodosSettings> {
    let mut merged = serde_json::to_value(TodosSettings::default())
        .map_err(|e| SettingsError::InvalidValue(format!("defaults: {e}")))?;
    let parse_err = |source: serde_json::Error| SettingsError::Parse {
        path: path.to_owned(),
        source,
    };

    if path.exists() {
        debug!(?path, "loading settings file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        let file: Value = serde_json::from_str(&content).map_err(parse_err)?;
        if !file.is_object() {
            return Err(SettingsError::InvalidValue(format!(
                "{} must hold a JSON object",
                path.display()
            )));
        }
        deep_merge(&mut merged, file);
    } else {
        debug!(?path, "no settings file, using defaults");
    }

    let mut settings: TodosSettings = serde_json::from_value(merged).map_err(parse_err)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Overlay `overrides` onto `base`: objects merge key by key, `null`
/// leaves the base value alone, anything else replaces it.
pub fn deep_merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                if value.is_null() {
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            if !value.is_null() {
                *slot = value;
            }
        }
    }
}

/// Apply `TODOS_*` environment variable overrides.
/// Invalid values are ignored with a warning.
pub fn apply_env_overrides(settings: &mut TodosSettings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

fn apply_overrides(settings: &mut TodosSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read("TODOS_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("TODOS_PORT") {
        match parse_u16_range(&v, 1, 65535) {
            Some(port) => settings.server.port = port,
            None => tracing::warn!(key = "TODOS_PORT", value = %v, "invalid port env var, ignoring"),
        }
    }
    if let Some(v) = read("TODOS_DB_PATH") {
        settings.database.path = v;
    }
    if let Some(v) = read("TODOS_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("TODOS_LOG_JSON") {
        match parse_bool(&v) {
            Some(json) => settings.logging.json = json,
            None => tracing::warn!(key = "TODOS_LOG_JSON", value = %v, "invalid boolean env var, ignoring"),
        }
    }
}

/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}
