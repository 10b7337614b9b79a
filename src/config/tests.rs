use serial_test::serial;

use super::*;

fn clear_env() {
    for key in [
        "WHISTLE_API__BASE_URL",
        "WHISTLE_API__TOKEN",
        "WHISTLE_LOGGING__LEVEL",
        "WHISTLE_CACHE__FEED_ENTRY_LIMIT",
    ] {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
#[serial]
fn defaults_apply_without_files_or_env() {
    clear_env();

    let settings = Settings::load(None, &SettingsOverrides::default()).expect("loaded settings");

    assert_eq!(settings.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.api.timeout_secs, DEFAULT_API_TIMEOUT_SECS);
    assert_eq!(settings.api.token, None);
    assert_eq!(settings.logging.level, LogLevel::Info);
    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert!(settings.cache.enable_feed_cache);
    assert_eq!(settings.cache.feed_entry_limit, DEFAULT_FEED_ENTRY_LIMIT);
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    clear_env();
    unsafe {
        std::env::set_var("WHISTLE_API__BASE_URL", "https://mod.example.com/api/");
        std::env::set_var("WHISTLE_CACHE__FEED_ENTRY_LIMIT", "16");
    }

    let settings = Settings::load(None, &SettingsOverrides::default()).expect("loaded settings");

    assert_eq!(settings.api.base_url, "https://mod.example.com/api/");
    assert_eq!(settings.cache.feed_entry_limit, 16);

    clear_env();
}

#[test]
#[serial]
fn cli_overrides_beat_environment() {
    clear_env();
    unsafe {
        std::env::set_var("WHISTLE_API__BASE_URL", "https://from-env.example.com/");
    }

    let overrides = SettingsOverrides {
        api_base_url: Some("https://from-cli.example.com/".to_string()),
        api_token: Some("tok_123".to_string()),
        log_level: Some(LogLevel::Debug),
        log_format: Some(LogFormat::Json),
    };
    let settings = Settings::load(None, &overrides).expect("loaded settings");

    assert_eq!(settings.api.base_url, "https://from-cli.example.com/");
    assert_eq!(settings.api.token.as_deref(), Some("tok_123"));
    assert_eq!(settings.logging.level, LogLevel::Debug);
    assert_eq!(settings.logging.format, LogFormat::Json);

    clear_env();
}

#[test]
fn log_levels_map_to_filters() {
    assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
    assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
}
