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
    assert_eq!(resolve_settings(None, env_from(&[])), Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        bind_addr = "0.0.0.0:9000"
        max_time_limit_secs = 12.5
        max_states = 5000
    "#;
    let settings = resolve_settings(Some(raw), env_from(&[]));
    assert_eq!(settings.bind_addr, "0.0.0.0:9000");
    assert_eq!(settings.max_time_limit_secs, 12.5);
    assert_eq!(settings.max_states, Some(5000));
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let raw = r#"bind_addr = "0.0.0.0:9000""#;
    let settings = resolve_settings(
        Some(raw),
        env_from(&[
            ("SOLVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("APP__MAX_TIME_LIMIT_SECS", "3"),
            ("APP__MAX_STATES", "77"),
        ]),
    );
    assert_eq!(settings.bind_addr, "127.0.0.1:2");
    assert_eq!(settings.max_time_limit_secs, 3.0);
    assert_eq!(settings.max_states, Some(77));
}

#[test]
fn malformed_values_are_ignored() {
    let settings = resolve_settings(
        Some("this is not toml ="),
        env_from(&[
            ("APP__MAX_TIME_LIMIT_SECS", "-4"),
            ("APP__MAX_STATES", "lots"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn default_state_budget_is_bounded() {
    assert_eq!(Settings::default().max_states, Some(DEFAULT_MAX_STATES));
    assert_eq!(
        resolve_settings(None, env_from(&[])).max_states,
        Some(DEFAULT_MAX_STATES)
    );
}

#[test]
fn file_time_limit_must_be_positive_and_finite() {
    for raw in [
        "max_time_limit_secs = -5.0",
        "max_time_limit_secs = 0.0",
        "max_time_limit_secs = inf",
        "max_time_limit_secs = nan",
    ] {
        let settings = resolve_settings(Some(raw), env_from(&[]));
        assert_eq!(settings.max_time_limit_secs, 60.0, "{raw}");
    }
}
