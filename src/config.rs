//! Configuration types.
//!
//! Built once at startup from the environment and handed to the gateway,
//! the store and the registration flow through their constructors.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Telegram Bot API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Command that (re)starts the registration conversation.
pub const DEFAULT_START_COMMAND: &str = "/start";

/// Telegram bot settings.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token.
    pub bot_token: SecretString,
    /// Base URL of the Bot API, without trailing slash.
    pub api_base_url: String,
    /// Public base URL of this service. When set, the webhook is registered
    /// at `<webhook_url>/api/webhook` on startup.
    pub webhook_url: Option<String>,
    /// Text that triggers the greeting.
    pub start_command: String,
}

/// HTTP server and storage settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("./data/casting-bot.db"),
        }
    }
}

/// Whole-process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = non_empty("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;

        let api_base_url = non_empty("TELEGRAM_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let webhook_url = non_empty("WEBHOOK_URL").map(|url| url.trim_end_matches('/').to_string());

        let start_command =
            non_empty("CASTING_BOT_START_COMMAND").unwrap_or_else(|| DEFAULT_START_COMMAND.to_string());

        let defaults = ServerConfig::default();

        let port = match non_empty("CASTING_BOT_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "CASTING_BOT_PORT".to_string(),
                message: format!("{raw:?} is not a port number: {e}"),
            })?,
            None => defaults.port,
        };

        let db_path = non_empty("CASTING_BOT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        Ok(Self {
            bot: BotConfig {
                bot_token: SecretString::from(bot_token),
                api_base_url,
                webhook_url,
                start_command,
            },
            server: ServerConfig { port, db_path },
        })
    }
}
