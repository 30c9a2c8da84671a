use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

const DEFAULT_MODEL: &str = "gpt-4";

/// Top-level configuration loaded from .pr-reviewer.toml.
/// All fields are optional; with zero config the tool runs on environment
/// variables alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to the GITHUB_TOKEN env var.
    pub token: Option<String>,

    /// API base URL, overridable for GitHub Enterprise installs.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// OpenAI API key. If None, falls back to the OPENAI_API_KEY env var.
    pub api_key: Option<String>,

    /// Completion model identifier. Falls back to OPENAI_API_MODEL, then to
    /// the built-in default.
    pub model: Option<String>,

    /// Endpoint base, overridable for compatible providers.
    #[serde(default = "default_openai_base")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: default_openai_base(),
        }
    }
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewConfig {
    /// Comma-separated glob patterns; matching files are excluded from
    /// review. Falls back to the EXCLUDE_PATTERNS env var.
    pub exclude: Option<String>,
}

impl Config {
    /// Load configuration from .pr-reviewer.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-reviewer.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to the GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }

    /// Resolve the OpenAI API key: config file value takes precedence,
    /// falls back to the OPENAI_API_KEY env var.
    pub fn openai_api_key(&self) -> Option<String> {
        self.openai
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    /// Resolve the completion model: config file, then OPENAI_API_MODEL,
    /// then the built-in default.
    pub fn openai_model(&self) -> String {
        self.openai
            .model
            .clone()
            .or_else(|| std::env::var("OPENAI_API_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Resolve the raw exclusion-pattern string: config file, then the
    /// EXCLUDE_PATTERNS env var, then empty (exclude nothing).
    pub fn exclude_patterns(&self) -> String {
        self.review
            .exclude
            .clone()
            .or_else(|| std::env::var("EXCLUDE_PATTERNS").ok())
            .unwrap_or_default()
    }
}
