//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use uuid::Uuid;

#[cfg(test)]
mod tests;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "whistle";
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api/";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FEED_ENTRY_LIMIT: usize = 200;
const DEFAULT_CONSUME_BATCH_LIMIT: usize = 100;

/// Command-line arguments for the whistle-console binary.
#[derive(Debug, Parser)]
#[command(name = "whistle-console", version, about = "Silent Whistle moderation console")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "WHISTLE_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Page through a user's feed via the cache and print the accumulated entry.
    Feed(FeedArgs),
    /// Ban a user on the platform.
    Ban(ModerateArgs),
    /// Warn a user on the platform.
    Warn(ModerateArgs),
}

#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Id of the user whose feed to inspect.
    #[arg(long)]
    pub user: Uuid,

    /// How many pages to walk before printing.
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Shouts per page.
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

#[derive(Debug, Args)]
pub struct ModerateArgs {
    /// Id of the user to act on.
    #[arg(long)]
    pub user: Uuid,

    /// Reason recorded with the action.
    #[arg(long)]
    pub reason: String,

    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

/// CLI/env overrides applied on top of file-based settings.
#[derive(Debug, Default, Args)]
pub struct SettingsOverrides {
    /// Base URL of the platform API.
    #[arg(long = "api-base-url", env = "WHISTLE_API_BASE_URL", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Bearer token for the platform API.
    #[arg(long = "api-token", env = "WHISTLE_API_TOKEN", value_name = "TOKEN")]
    pub api_token: Option<String>,

    /// Minimum log level.
    #[arg(long = "log-level", env = "WHISTLE_LOG_LEVEL", value_enum)]
    pub log_level: Option<LogLevel>,

    /// Log output format.
    #[arg(long = "log-format", env = "WHISTLE_LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the platform API.
    pub base_url: String,
    /// Bearer token injected into every request, if set.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enable_feed_cache: bool,
    pub feed_entry_limit: usize,
    pub consume_batch_limit: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enable_feed_cache: true,
            feed_entry_limit: DEFAULT_FEED_ENTRY_LIMIT,
            consume_batch_limit: DEFAULT_CONSUME_BATCH_LIMIT,
        }
    }
}

/// Fully resolved application settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

impl Settings {
    /// Load settings with layered precedence: shipped defaults, then the
    /// local `whistle.toml` (or an explicit `--config-file`), then `WHISTLE_`
    /// environment variables, then CLI overrides.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &SettingsOverrides,
    ) -> Result<Self, SettingsError> {
        let mut builder =
            Config::builder().add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false));

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("WHISTLE")
                .separator("__")
                .try_parsing(true),
        );

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply(overrides);
        Ok(settings)
    }

    fn apply(&mut self, overrides: &SettingsOverrides) {
        if let Some(base_url) = &overrides.api_base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(token) = &overrides.api_token {
            self.api.token = Some(token.clone());
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }
}
