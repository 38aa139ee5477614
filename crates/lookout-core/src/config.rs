use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LookoutError;

/// Top-level configuration loaded from `lookout.toml`.
///
/// Credentials may be omitted from the file; the clients fall back to the
/// `GITHUB_TOKEN` and `ANTHROPIC_API_KEY` environment variables at startup
/// and refuse to start without them.
///
/// # Examples
///
/// ```
/// use lookout_core::LookoutConfig;
///
/// let config = LookoutConfig::default();
/// assert_eq!(config.server.port, 8080);
/// assert_eq!(config.llm.max_tokens, 1024);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookoutConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl LookoutConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Io`] if the file cannot be read, or
    /// [`LookoutError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lookout_core::LookoutConfig;
    /// use std::path::Path;
    ///
    /// let config = LookoutConfig::from_file(Path::new("lookout.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, LookoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use lookout_core::LookoutConfig;
    ///
    /// let toml = r#"
    /// [server]
    /// port = 3000
    /// "#;
    /// let config = LookoutConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.server.port, 3000);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, LookoutError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on (default: 8080).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// GitHub API configuration.
///
/// # Examples
///
/// ```
/// use lookout_core::GitHubConfig;
///
/// let config = GitHubConfig::default();
/// assert!(config.token.is_none());
/// assert!(config.base_url.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Personal access token. Falls back to `GITHUB_TOKEN` when unset.
    pub token: Option<String>,
    /// Custom API base URL (GitHub Enterprise, test servers).
    pub base_url: Option<String>,
}

/// LLM provider configuration.
///
/// # Examples
///
/// ```
/// use lookout_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "claude-3-5-sonnet-latest");
/// assert_eq!(config.max_tokens, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum output tokens per review (default: 1024).
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key. Falls back to `ANTHROPIC_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Custom base URL for API requests.
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "claude-3-5-sonnet-latest".into()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}
