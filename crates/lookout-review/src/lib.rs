//! The PR review flow: LLM client, GitHub client, prompt construction,
//! and the webhook orchestration handler.

pub mod github;
pub mod handler;
pub mod llm;
pub mod prompt;
