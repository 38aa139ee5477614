use serde::Deserialize;

/// A GitHub `pull_request` webhook event, reduced to the fields Lookout
/// acts on.
///
/// Deserialization fails when any required field is absent — a malformed
/// delivery is rejected instead of proceeding with missing data. Extra
/// fields in the payload are ignored.
///
/// # Examples
///
/// ```
/// use lookout_core::PullRequestEvent;
///
/// let event: PullRequestEvent = serde_json::from_str(
///     r#"{"action":"opened","pull_request":{"number":42},"repository":{"full_name":"owner/repo"}}"#,
/// )
/// .unwrap();
/// assert_eq!(event.action, "opened");
/// assert_eq!(event.pull_request.number, 42);
/// assert_eq!(event.repository.full_name, "owner/repo");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// What happened to the pull request (`"opened"`, `"closed"`, ...).
    pub action: String,
    /// The pull request the event refers to.
    pub pull_request: PullRequestInfo,
    /// The repository the event originated from.
    pub repository: RepositoryInfo,
}

/// Pull request fields used by Lookout.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    /// The PR number within its repository.
    pub number: u64,
}

/// Repository fields used by Lookout.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    /// Fully-qualified `owner/name` of the repository.
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_valid_event() {
        let json = r#"{
            "action": "opened",
            "pull_request": {"number": 7, "title": "extra fields are fine"},
            "repository": {"full_name": "octocat/hello-world", "private": false}
        }"#;
        let event: PullRequestEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.action, "opened");
        assert_eq!(event.pull_request.number, 7);
        assert_eq!(event.repository.full_name, "octocat/hello-world");
    }

    #[test]
    fn missing_action_fails() {
        let json = r#"{
            "pull_request": {"number": 7},
            "repository": {"full_name": "octocat/hello-world"}
        }"#;
        assert!(serde_json::from_str::<PullRequestEvent>(json).is_err());
    }

    #[test]
    fn missing_nested_number_fails() {
        let json = r#"{
            "action": "opened",
            "pull_request": {},
            "repository": {"full_name": "octocat/hello-world"}
        }"#;
        assert!(serde_json::from_str::<PullRequestEvent>(json).is_err());
    }

    #[test]
    fn missing_repository_fails() {
        let json = r#"{
            "action": "opened",
            "pull_request": {"number": 7}
        }"#;
        assert!(serde_json::from_str::<PullRequestEvent>(json).is_err());
    }

    #[test]
    fn negative_number_fails() {
        let json = r#"{
            "action": "opened",
            "pull_request": {"number": -1},
            "repository": {"full_name": "octocat/hello-world"}
        }"#;
        assert!(serde_json::from_str::<PullRequestEvent>(json).is_err());
    }

    #[test]
    fn non_opened_action_still_parses() {
        let json = r#"{
            "action": "closed",
            "pull_request": {"number": 3},
            "repository": {"full_name": "octocat/hello-world"}
        }"#;
        let event: PullRequestEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.action, "closed");
    }
}
