use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub morph: MorphConfig,
}

/// Bot and gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Path to the YAML vocabulary file
    pub voc: PathBuf,
    /// Name of the environment variable holding the bot token. The token
    /// itself never lives in the config file.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Long-poll hold time for getUpdates
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Morphological normalizer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MorphConfig {
    /// Endpoint of a remote morphology service; empty/absent selects the
    /// built-in suffix-stripping normalizer
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Word -> lemma-set cache size; 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            lang: default_lang(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_token_env() -> String {
    "VOCABOT_TOKEN".to_string()
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    25
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_cache_capacity() -> usize {
    1000
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path specified in VOCABOT_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional; ignore errors
        let _ = dotenv::dotenv();

        let config_path = std::env::var("VOCABOT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config =
            toml::from_str(&config_str).context("Failed to parse config.toml")?;

        Ok(config)
    }

    /// Bot token from the configured environment variable.
    pub fn token(&self) -> Result<String> {
        std::env::var(&self.bot.token_env).map_err(|_| {
            anyhow::anyhow!(
                "Environment variable {} not set. Set it in your .env file or as an environment variable.",
                self.bot.token_env
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str("[bot]\nvoc = \"dialog.yaml\"\n").unwrap();
        assert_eq!(config.bot.voc, PathBuf::from("dialog.yaml"));
        assert_eq!(config.bot.token_env, "VOCABOT_TOKEN");
        assert_eq!(config.bot.api_base, "https://api.telegram.org");
        assert_eq!(config.bot.poll_timeout_secs, 25);
        assert_eq!(config.bot.log_level, "info");
        assert_eq!(config.morph.endpoint, None);
        assert_eq!(config.morph.cache_capacity, 1000);
    }

    #[test]
    fn test_full_config_parses() {
        let config: Config = toml::from_str(
            r#"
[bot]
voc = "pets.yaml"
token_env = "MY_TOKEN"
poll_timeout_secs = 50

[morph]
endpoint = "http://localhost:9090/normalize"
lang = "ru"
cache_capacity = 0
"#,
        )
        .unwrap();
        assert_eq!(config.bot.token_env, "MY_TOKEN");
        assert_eq!(
            config.morph.endpoint.as_deref(),
            Some("http://localhost:9090/normalize")
        );
        assert_eq!(config.morph.lang, "ru");
        assert_eq!(config.morph.cache_capacity, 0);
    }

    #[test]
    fn test_missing_voc_is_an_error() {
        let result: std::result::Result<Config, _> = toml::from_str("[bot]\n");
        assert!(result.is_err());
    }
}
