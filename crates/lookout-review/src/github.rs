use std::time::Duration;

use async_trait::async_trait;
use lookout_core::{GitHubConfig, LookoutError};

use crate::handler::SourceHost;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// GitHub pull request client for fetching diffs and posting comments.
///
/// The diff is fetched with a plain HTTP GET because it is a media-type
/// negotiation (`application/vnd.github.v3.diff`), not a JSON resource;
/// the comment post goes through octocrab.
///
/// # Examples
///
/// ```
/// use lookout_review::github::split_repo;
///
/// let (owner, repo) = split_repo("rust-lang/rust").unwrap();
/// assert_eq!(owner, "rust-lang");
/// assert_eq!(repo, "rust");
/// ```
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client from configuration.
    ///
    /// The token is resolved once here: an explicit `token` in the config,
    /// or the `GITHUB_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Config`] if no token is available, or
    /// [`LookoutError::GitHub`] if a client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lookout_core::GitHubConfig;
    /// use lookout_review::github::GitHubClient;
    ///
    /// let config = GitHubConfig {
    ///     token: Some("ghp_xxxx".into()),
    ///     ..GitHubConfig::default()
    /// };
    /// let client = GitHubClient::new(&config).unwrap();
    /// ```
    pub fn new(config: &GitHubConfig) -> Result<Self, LookoutError> {
        let token = match &config.token {
            Some(t) => t.clone(),
            None => std::env::var("GITHUB_TOKEN").map_err(|_| {
                LookoutError::Config(
                    "GITHUB_TOKEN not set. Add token under [github] in lookout.toml \
                     or set the GITHUB_TOKEN env var"
                        .into(),
                )
            })?,
        };

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut builder = octocrab::Octocrab::builder().personal_token(token.clone());
        if config.base_url.is_some() {
            builder = builder.base_uri(base_url.as_str()).map_err(|e| {
                LookoutError::GitHub(format!("invalid GitHub base URL: {e}"))
            })?;
        }
        let octocrab = builder
            .build()
            .map_err(|e| LookoutError::GitHub(format!("failed to create GitHub client: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LookoutError::GitHub(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            octocrab,
            http,
            base_url,
            token,
        })
    }

    /// Fetch the unified diff for a pull request, byte-for-byte as GitHub
    /// returns it.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Validation`] for an invalid repository or PR
    /// number, and [`LookoutError::GitHub`] on network errors or non-2xx
    /// responses. No retries.
    pub async fn fetch_diff(
        &self,
        repo_full_name: &str,
        pr_number: u64,
    ) -> Result<String, LookoutError> {
        split_repo(repo_full_name)?;
        validate_pr_number(pr_number)?;

        let url = format!("{}/repos/{repo_full_name}/pulls/{pr_number}", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Accept", DIFF_MEDIA_TYPE)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", "lookout")
            .send()
            .await
            .map_err(|e| LookoutError::GitHub(format!("failed to fetch PR diff: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookoutError::GitHub(format!(
                "GitHub API error {status}: {body}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| LookoutError::GitHub(format!("failed to read diff response: {e}")))
    }

    /// Post a comment to the pull request's discussion thread.
    ///
    /// Creates exactly one new comment per call; posting the same body
    /// twice creates two comments.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Validation`] for an invalid repository or PR
    /// number, and [`LookoutError::GitHub`] on API errors. No retries.
    pub async fn post_comment(
        &self,
        repo_full_name: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<(), LookoutError> {
        let (owner, repo) = split_repo(repo_full_name)?;
        validate_pr_number(pr_number)?;

        let route = format!("/repos/{owner}/{repo}/issues/{pr_number}/comments");
        let payload = serde_json::json!({ "body": body });

        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .map_err(|e| LookoutError::GitHub(format!("failed to post comment: {e}")))?;

        tracing::info!(repo = repo_full_name, pr = pr_number, "posted review comment");
        Ok(())
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn fetch_diff(
        &self,
        repo_full_name: &str,
        pr_number: u64,
    ) -> Result<String, LookoutError> {
        GitHubClient::fetch_diff(self, repo_full_name, pr_number).await
    }

    async fn post_comment(
        &self,
        repo_full_name: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<(), LookoutError> {
        GitHubClient::post_comment(self, repo_full_name, pr_number, body).await
    }
}

/// Split a fully-qualified repository name into `(owner, name)`.
///
/// # Errors
///
/// Returns [`LookoutError::Validation`] if the name is not in non-empty
/// `owner/name` form.
///
/// # Examples
///
/// ```
/// use lookout_review::github::split_repo;
///
/// let (owner, repo) = split_repo("octocat/hello-world").unwrap();
/// assert_eq!(owner, "octocat");
/// assert_eq!(repo, "hello-world");
/// ```
pub fn split_repo(repo_full_name: &str) -> Result<(&str, &str), LookoutError> {
    let Some((owner, repo)) = repo_full_name.split_once('/') else {
        return Err(LookoutError::Validation(format!(
            "invalid repository '{repo_full_name}', expected owner/name"
        )));
    };
    if owner.is_empty() || repo.is_empty() {
        return Err(LookoutError::Validation(format!(
            "invalid repository '{repo_full_name}', expected owner/name"
        )));
    }
    Ok((owner, repo))
}

fn validate_pr_number(pr_number: u64) -> Result<(), LookoutError> {
    if pr_number == 0 {
        return Err(LookoutError::Validation(
            "PR number must be a positive integer".into(),
        ));
    }
    Ok(())
}
