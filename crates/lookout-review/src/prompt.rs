const REVIEW_INSTRUCTIONS: &str = "\
You are an expert software reviewer. Please review the given code diff in a pull request.
Give constructive, actionable comments on:
- Logic issues
- Suggestions for better implementation
- Time and space complexity

Only comment on what's in the diff.

If no major issues are found, leave a creative one-word compliment to make the author smile.

Checklist:
- Did the author mention time complexity?
- Did the author mention space complexity?
- Did the author explain the approach with comments?";

/// The fixed review instructions sent with every diff.
///
/// Process-wide constant; combined with the diff at call time and never
/// mutated after start.
///
/// # Examples
///
/// ```
/// use lookout_review::prompt::review_instructions;
///
/// let instructions = review_instructions();
/// assert!(instructions.contains("expert software reviewer"));
/// ```
pub fn review_instructions() -> &'static str {
    REVIEW_INSTRUCTIONS
}

/// Build the outbound prompt: instructions, a separator noting that the
/// diff follows, and the diff fenced as a code block.
///
/// # Examples
///
/// ```
/// use lookout_review::prompt::build_review_prompt;
///
/// let prompt = build_review_prompt("+new line", "Review this");
/// assert!(prompt.contains("+new line"));
/// assert!(prompt.contains("```diff"));
/// ```
pub fn build_review_prompt(diff: &str, instructions: &str) -> String {
    format!("{instructions}\n\nHere is the pull request diff:\n```diff\n{diff}\n```")
}
