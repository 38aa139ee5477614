use std::sync::Arc;

use async_trait::async_trait;
use lookout_core::{LookoutError, PullRequestEvent};

use crate::prompt;

/// Operations against the code-hosting platform.
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Fetch the unified diff for a pull request.
    async fn fetch_diff(
        &self,
        repo_full_name: &str,
        pr_number: u64,
    ) -> Result<String, LookoutError>;

    /// Post a comment to the pull request's discussion thread.
    async fn post_comment(
        &self,
        repo_full_name: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<(), LookoutError>;
}

/// Obtains a natural-language review for a diff.
#[async_trait]
pub trait Reviewer: Send + Sync {
    /// Send the diff with the given instructions, return the review text.
    async fn review(&self, diff: &str, instructions: &str) -> Result<String, LookoutError>;
}

/// Terminal classification of one webhook invocation.
///
/// Failures are the `Err` arm of [`ReviewHandler::handle_event`]; this enum
/// covers the two success shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The event did not qualify for review; nothing was done.
    Ignored,
    /// A review was posted to the pull request.
    Posted,
}

impl HandlerOutcome {
    /// The message reported to the webhook caller.
    pub fn message(self) -> &'static str {
        match self {
            HandlerOutcome::Ignored => "Ignored event",
            HandlerOutcome::Posted => "Review posted",
        }
    }
}

/// Orchestrates one webhook delivery: validate, filter, fetch the diff,
/// obtain a review, post it back.
///
/// Holds the clients behind trait objects so the sequencing can be
/// exercised without the network.
pub struct ReviewHandler {
    source: Arc<dyn SourceHost>,
    reviewer: Arc<dyn Reviewer>,
    instructions: &'static str,
}

impl ReviewHandler {
    /// Create a handler over the given clients with the fixed review
    /// instructions.
    pub fn new(source: Arc<dyn SourceHost>, reviewer: Arc<dyn Reviewer>) -> Self {
        Self {
            source,
            reviewer,
            instructions: prompt::review_instructions(),
        }
    }

    /// Handle one webhook delivery.
    ///
    /// Only `action == "opened"` qualifies for review; every other action
    /// is ignored with zero side effects, so pushes and edits are not
    /// re-reviewed. The three outbound calls run strictly in sequence and
    /// a failure at any step terminates the invocation — no comment is
    /// posted unless both the diff fetch and the review succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Validation`] for a structurally invalid
    /// payload, and propagates client errors from the outbound calls.
    pub async fn handle_event(
        &self,
        payload: serde_json::Value,
    ) -> Result<HandlerOutcome, LookoutError> {
        let event: PullRequestEvent = serde_json::from_value(payload)
            .map_err(|e| LookoutError::Validation(e.to_string()))?;

        if event.action != "opened" {
            tracing::debug!(action = %event.action, "ignoring pull_request action");
            return Ok(HandlerOutcome::Ignored);
        }

        let repo = &event.repository.full_name;
        let pr_number = event.pull_request.number;
        tracing::info!(repo = %repo, pr = pr_number, "reviewing pull request");

        let diff = self.source.fetch_diff(repo, pr_number).await?;
        let review = self.reviewer.review(&diff, self.instructions).await?;
        self.source.post_comment(repo, pr_number, &review).await?;

        Ok(HandlerOutcome::Posted)
    }
}
