use std::time::Duration;

use async_trait::async_trait;
use lookout_core::{LlmConfig, LookoutError};
use serde::Deserialize;

use crate::handler::Reviewer;
use crate::prompt;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// LLM calls are slow; tuned well above the GitHub client's timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Anthropic Messages API client.
///
/// Sends a diff plus fixed instructions as a single user message and
/// extracts the text of the response.
///
/// # Examples
///
/// ```
/// use lookout_core::LlmConfig;
/// use lookout_review::llm::LlmClient;
///
/// let config = LlmConfig {
///     api_key: Some("test-key".into()),
///     ..LlmConfig::default()
/// };
/// let client = LlmClient::new(&config).unwrap();
/// assert_eq!(client.model(), "claude-3-5-sonnet-latest");
/// ```
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl LlmClient {
    /// Create a new LLM client from configuration.
    ///
    /// The API key is resolved once here: an explicit `api_key` in the
    /// config, or the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Config`] if no API key is available, or
    /// [`LookoutError::Llm`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LookoutError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                LookoutError::Config(
                    "ANTHROPIC_API_KEY not set. Add api_key under [llm] in lookout.toml \
                     or set the ANTHROPIC_API_KEY env var"
                        .into(),
                )
            })?,
        };

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LookoutError::Llm(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Return the model name from the configuration.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a diff for review and return the model's response text.
    ///
    /// Builds a single request to `{base_url}/v1/messages` with one user
    /// message containing the instructions and the fenced diff. The diff is
    /// sent as-is, however large.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Llm`] on transport failures or non-2xx
    /// responses, and [`LookoutError::LlmResponse`] when a 2xx response
    /// body does not contain the expected text content.
    pub async fn review(&self, diff: &str, instructions: &str) -> Result<String, LookoutError> {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = format!("{base_url}/v1/messages");

        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt::build_review_prompt(diff, instructions),
                }
            ],
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LookoutError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(LookoutError::Llm(format!(
                "LLM API error {status}: {body_text}"
            )));
        }

        let response_body: MessagesResponse = response.json().await.map_err(|e| {
            LookoutError::LlmResponse(format!("failed to parse response body: {e}"))
        })?;

        response_body
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| {
                LookoutError::LlmResponse("response content has no text block".into())
            })
    }
}

#[async_trait]
impl Reviewer for LlmClient {
    async fn review(&self, diff: &str, instructions: &str) -> Result<String, LookoutError> {
        LlmClient::review(self, diff, instructions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> LlmConfig {
        LlmConfig {
            api_key: Some("test-key".into()),
            base_url: Some(base_url),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn client_construction_succeeds_with_explicit_key() {
        let config = LlmConfig {
            api_key: Some("test-key".into()),
            ..LlmConfig::default()
        };
        assert!(LlmClient::new(&config).is_ok());
    }

    #[test]
    fn model_returns_config_model() {
        let config = LlmConfig {
            api_key: Some("test-key".into()),
            model: "claude-sonnet-4-20250514".into(),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&config).unwrap();
        assert_eq!(client.model(), "claude-sonnet-4-20250514");
    }

    #[tokio::test]
    async fn review_returns_response_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "claude-3-5-sonnet-latest",
                "max_tokens": 1024,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"text","text":"Looks clean!"}]}"#)
            .create_async()
            .await;

        let client = LlmClient::new(&test_config(server.url())).unwrap();
        let result = client.review("diff --git ...", "Review this").await.unwrap();

        assert_eq!(result, "Looks clean!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn review_sends_instructions_and_fenced_diff() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_body(mockito::Matcher::Regex(
                "Review this.*Here is the pull request diff".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"text","text":"ok"}]}"#)
            .create_async()
            .await;

        let client = LlmClient::new(&test_config(server.url())).unwrap();
        client.review("+added line", "Review this").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = LlmClient::new(&test_config(server.url())).unwrap();
        let err = client.review("diff", "instructions").await.unwrap_err();

        assert!(matches!(err, LookoutError::Llm(_)), "got {err:?}");
        assert!(err.to_string().contains("529"));
    }

    #[tokio::test]
    async fn missing_text_block_is_a_structural_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"tool_use"}]}"#)
            .create_async()
            .await;

        let client = LlmClient::new(&test_config(server.url())).unwrap();
        let err = client.review("diff", "instructions").await.unwrap_err();

        assert!(matches!(err, LookoutError::LlmResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unparseable_body_is_a_structural_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let client = LlmClient::new(&test_config(server.url())).unwrap();
        let err = client.review("diff", "instructions").await.unwrap_err();

        assert!(matches!(err, LookoutError::LlmResponse(_)), "got {err:?}");
    }
}
