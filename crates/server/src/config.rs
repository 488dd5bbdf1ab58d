use std::fs;

use serde::Deserialize;

const DEFAULT_MAX_STATES: u64 = 5_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    pub max_time_limit_secs: f64,
    pub max_states: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8470".into(),
            max_time_limit_secs: 60.0,
            max_states: Some(DEFAULT_MAX_STATES),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    max_time_limit_secs: Option<f64>,
    max_states: Option<u64>,
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string("server.toml").ok();
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn resolve_settings(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.bind_addr = v;
                }
                if let Some(v) = file_cfg.max_time_limit_secs.and_then(positive_finite) {
                    settings.max_time_limit_secs = v;
                }
                if file_cfg.max_states.is_some() {
                    settings.max_states = file_cfg.max_states;
                }
            }
            Err(error) => tracing::warn!(%error, "ignoring malformed server.toml"),
        }
    }

    if let Some(v) = env("SOLVER_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = env("APP__MAX_TIME_LIMIT_SECS") {
        if let Some(parsed) = v.parse::<f64>().ok().and_then(positive_finite) {
            settings.max_time_limit_secs = parsed;
        }
    }

    if let Some(v) = env("APP__MAX_STATES") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.max_states = Some(parsed);
        }
    }

    settings
}

fn positive_finite(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
