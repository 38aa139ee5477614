/// Errors that can occur across the Lookout service.
///
/// Each variant wraps a specific failure domain. Library crates use this
/// type directly; the binary crate converts to a diagnostic at the boundary.
///
/// # Examples
///
/// ```
/// use lookout_core::LookoutError;
///
/// let err = LookoutError::Config("missing API key".into());
/// assert!(err.to_string().contains("missing API key"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum LookoutError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Structurally invalid inbound webhook payload.
    #[error("invalid event payload: {0}")]
    Validation(String),

    /// GitHub API or network failure.
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// LLM API transport failure (non-2xx, network, timeout).
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM responded 2xx but the body did not have the expected shape.
    #[error("malformed LLM response: {0}")]
    LlmResponse(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
