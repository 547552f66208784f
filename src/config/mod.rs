use crate::bot::BotSettings;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_PATH_VAR: &str = "KARAOKE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub command_prefix: String,
    pub message_chunk_size: usize,
    pub max_message_chunks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: crate::extractors::genius::DEFAULT_BASE_URL.to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            command_prefix: "/".to_string(),
            message_chunk_size: 1900,
            max_message_chunks: 3,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (explicit path or `KARAOKE_CONFIG`), then
    /// `KARAOKE_*` environment variables. A `.env` file is loaded first if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_file.display());
        }

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply `KARAOKE_*` overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("KARAOKE_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("KARAOKE_USER_AGENT") {
            self.user_agent = v;
        }
        if let Some(v) = lookup("KARAOKE_ACCEPT_LANGUAGE") {
            self.accept_language = v;
        }
        if let Some(v) = lookup("KARAOKE_PREFIX") {
            self.command_prefix = v;
        }
        if let Some(n) = lookup("KARAOKE_CHUNK_SIZE").and_then(|v| v.parse().ok()) {
            self.message_chunk_size = n;
        }
        if let Some(n) = lookup("KARAOKE_MAX_CHUNKS").and_then(|v| v.parse().ok()) {
            self.max_message_chunks = n;
        }
    }

    pub fn bot_settings(&self) -> BotSettings {
        BotSettings {
            prefix: self.command_prefix.clone(),
            chunk_size: self.message_chunk_size,
            max_chunks: self.max_message_chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "command_prefix = \"!\"")?;
        writeln!(file, "message_chunk_size = 500")?;

        let config = Config::from_file(file.path())?;
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.message_chunk_size, 500);
        assert_eq!(config.base_url, "https://genius.com");
        assert_eq!(config.max_message_chunks, 3);
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_an_error() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "message_chunk_size = \"lots\"")?;
        assert!(Config::from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "KARAOKE_BASE_URL" => Some("http://localhost:8080".to_string()),
            "KARAOKE_CHUNK_SIZE" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.message_chunk_size, 1900);
    }

    #[test]
    fn test_max_chunks_override() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "KARAOKE_MAX_CHUNKS").then(|| "5".to_string()));
        assert_eq!(config.max_message_chunks, 5);
        assert_eq!(config.bot_settings().max_chunks, 5);
    }

    #[test]
    fn test_bot_settings_follow_config() {
        let config = Config {
            command_prefix: "!".to_string(),
            ..Config::default()
        };
        let settings = config.bot_settings();
        assert_eq!(settings.prefix, "!");
        assert_eq!(settings.chunk_size, 1900);
    }
}
