//! Config tests.

use crate::config::{
    parse_concurrency, parse_group_ids, parse_group_names, BotConfig, DEFAULT_LOG_FILE,
};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "OPERATOR_ID",
    "GROUP_IDS",
    "GROUP_NAMES",
    "BROADCAST_CONCURRENCY",
    "LOG_FILE",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPERATOR_ID", "42");
    env::set_var("GROUP_IDS", "-1001, -1002");
    env::set_var("GROUP_NAMES", "News, Chat");
}

/// **Test: required vars only; concurrency 1, default log file, no API URL.**
#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    set_required();

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert_eq!(config.operator_id(), 42);
    assert_eq!(config.registry().len(), 2);
    assert_eq!(config.registry().get(1).unwrap().name, "Chat");
    assert_eq!(config.registry().get(1).unwrap().id, -1002);
    assert_eq!(config.broadcast_concurrency(), 1);
    assert_eq!(config.log_file(), DEFAULT_LOG_FILE);
    assert!(config.telegram_api_url().is_none());
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    set_required();
    env::set_var("BROADCAST_CONCURRENCY", "4");
    env::set_var("LOG_FILE", "/tmp/groupcast.log");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
    assert_eq!(config.broadcast_concurrency(), 4);
    assert_eq!(config.log_file(), "/tmp/groupcast.log");
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert!(config.validate().is_ok());

    clear_env();
}

/// **Test: each required variable missing makes load fail.**
#[test]
#[serial]
fn test_missing_required_values_fail() {
    for missing in ["BOT_TOKEN", "OPERATOR_ID", "GROUP_IDS", "GROUP_NAMES"] {
        clear_env();
        set_required();
        env::remove_var(missing);

        let err = BotConfig::load(None).err().expect("load must fail");
        assert!(
            err.to_string().contains(missing),
            "error for {} was: {}",
            missing,
            err
        );
    }
    clear_env();
}

/// **Test: GROUP_IDS and GROUP_NAMES of different length are rejected.**
#[test]
#[serial]
fn test_group_count_mismatch_fails() {
    clear_env();
    set_required();
    env::set_var("GROUP_NAMES", "News");

    assert!(BotConfig::load(None).is_err());

    clear_env();
}

#[test]
#[serial]
fn test_malformed_operator_id_fails() {
    clear_env();
    set_required();
    env::set_var("OPERATOR_ID", "me");

    assert!(BotConfig::load(None).is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    set_required();
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
fn test_parse_group_ids() {
    assert_eq!(parse_group_ids(" -1, -2 ,-3").unwrap(), vec![-1, -2, -3]);
    assert_eq!(parse_group_ids("-1,,").unwrap(), vec![-1]);
    assert!(parse_group_ids("-1,abc").is_err());
}

#[test]
fn test_parse_group_names() {
    assert_eq!(parse_group_names(" A , B b,C "), vec!["A", "B b", "C"]);
}

#[test]
fn test_parse_concurrency() {
    assert_eq!(parse_concurrency("3").unwrap(), 3);
    assert!(parse_concurrency("0").is_err());
    assert!(parse_concurrency("-1").is_err());
}
