//! Configuration management for ReviewAI
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REVIEWAI_*)
//! 3. Config file (~/.config/reviewai/config.toml)
//! 4. Default values

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::completion::SamplingOptions;
use crate::{Error, Result};

/// Completion service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// OpenAI-compatible chat-completions endpoint URL
    pub api_url: String,

    /// Bearer token for the endpoint (None for unauthenticated endpoints)
    pub api_key: Option<String>,

    /// Model name passed with every request
    pub model: String,

    /// Sampling temperature for review completions
    pub temperature: f32,

    /// Maximum number of tokens the model may generate
    pub max_tokens: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

impl CompletionConfig {
    /// Sampling options derived from this configuration
    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions::new(self.temperature, self.max_tokens)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server binds to
    pub bind_addr: String,

    /// SQLite database path (None uses the default cache location)
    pub database_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8780".to_string(),
            database_path: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Completion service configuration
    pub completion: CompletionConfig,

    /// Server configuration
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/reviewai/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reviewai").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REVIEWAI_API_URL: Completion endpoint URL
    /// - REVIEWAI_API_KEY: Bearer token for the endpoint
    /// - REVIEWAI_MODEL: Model to use
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(api_url) = std::env::var("REVIEWAI_API_URL") {
            self.completion.api_url = api_url;
        }

        if let Ok(api_key) = std::env::var("REVIEWAI_API_KEY") {
            self.completion.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("REVIEWAI_MODEL") {
            self.completion.model = model;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        api_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Self {
        if let Some(url) = api_url {
            self.completion.api_url = url;
        }

        if let Some(key) = api_key {
            self.completion.api_key = Some(key);
        }

        if let Some(m) = model {
            self.completion.model = m;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        api_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(api_url, api_key, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.completion.temperature, 0.7);
        assert_eq!(config.completion.max_tokens, 4000);
        assert!(config.completion.api_key.is_none());
        assert_eq!(config.server.bind_addr, "127.0.0.1:8780");
        assert!(config.server.database_path.is_none());
    }

    #[test]
    fn test_sampling_from_config() {
        let config = CompletionConfig::default();
        let sampling = config.sampling();
        assert_eq!(sampling.temperature, 0.7);
        assert_eq!(sampling.max_tokens, 4000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[completion]\nmodel = \"test-model\"\ntemperature = 0.2\n\n[server]\nbind_addr = \"0.0.0.0:9000\""
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.completion.model, "test-model");
        assert_eq!(config.completion.temperature, 0.2);
        // Unset fields fall back to defaults
        assert_eq!(config.completion.max_tokens, 4000);
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_from_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(
            Some("http://localhost:1234/v1/chat/completions".to_string()),
            Some("secret".to_string()),
            Some("local-model".to_string()),
        );

        assert_eq!(
            config.completion.api_url,
            "http://localhost:1234/v1/chat/completions"
        );
        assert_eq!(config.completion.api_key.as_deref(), Some("secret"));
        assert_eq!(config.completion.model, "local-model");
    }

    #[test]
    fn test_cli_overrides_none_keeps_existing() {
        let config = Config::default().with_cli_overrides(None, None, None);
        assert_eq!(config.completion.model, "gpt-4o-mini");
    }
}
