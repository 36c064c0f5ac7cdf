use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PAWMATCH_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.page_size, 25);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "pawmatch/0.1 (dog-catalog)");
    assert_eq!(cfg.grid_columns, 4);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_ENV", "production");
    map.insert("PAWMATCH_API_BASE_URL", "http://127.0.0.1:8080");
    map.insert("PAWMATCH_LOG_LEVEL", "debug");
    map.insert("PAWMATCH_PAGE_SIZE", "50");
    map.insert("PAWMATCH_REQUEST_TIMEOUT_SECS", "5");
    map.insert("PAWMATCH_USER_AGENT", "custom-agent/2.0");
    map.insert("PAWMATCH_GRID_COLUMNS", "2");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:8080");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.page_size, 50);
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.grid_columns, 2);
}

#[test]
fn build_app_config_rejects_non_numeric_page_size() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_PAGE_SIZE", "not-a-number");
    assert_invalid(&map, "PAWMATCH_PAGE_SIZE");
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_PAGE_SIZE", "0");
    assert_invalid(&map, "PAWMATCH_PAGE_SIZE");
}

#[test]
fn build_app_config_rejects_oversized_page_size() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_PAGE_SIZE", "101");
    assert_invalid(&map, "PAWMATCH_PAGE_SIZE");
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_REQUEST_TIMEOUT_SECS", "-1");
    assert_invalid(&map, "PAWMATCH_REQUEST_TIMEOUT_SECS");
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_REQUEST_TIMEOUT_SECS", "0");
    assert_invalid(&map, "PAWMATCH_REQUEST_TIMEOUT_SECS");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_API_BASE_URL", "ftp://example.com");
    assert_invalid(&map, "PAWMATCH_API_BASE_URL");
}

#[test]
fn build_app_config_rejects_zero_grid_columns() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_GRID_COLUMNS", "0");
    assert_invalid(&map, "PAWMATCH_GRID_COLUMNS");
}

#[test]
fn build_app_config_rejects_unknown_environment() {
    let mut map = HashMap::new();
    map.insert("PAWMATCH_ENV", "staging");
    assert_invalid(&map, "PAWMATCH_ENV");
}

#[test]
fn base_url_override_replaces_valid_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let mut cfg = build_app_config(lookup_from_map(&map)).unwrap();
    override_api_base_url(&mut cfg, "--base-url", "http://localhost:9000".to_string())
        .expect("http override is valid");
    assert_eq!(cfg.api_base_url, "http://localhost:9000");
}

#[test]
fn base_url_override_rejects_non_http_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let mut cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let err = override_api_base_url(&mut cfg, "--base-url", "ftp://x".to_string()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOverride { flag: "--base-url", .. }));
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn debug_output_lists_every_field() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let out = format!("{cfg:?}");
    assert!(out.starts_with("AppConfig {"));
    assert!(out.contains(DEFAULT_API_BASE_URL));
    assert!(out.contains("request_timeout_secs: 30"));
    assert!(out.contains("grid_columns: 4"));
}
