// Shared prompt fragments. Each feature module keeps its own prompts.rs;
// this file holds the pieces they have in common.

/// Appended to every prompt whose reply is decoded as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Placeholder used in resume digests for blank fields.
pub const NOT_PROVIDED: &str = "Not provided";

/// Returns `value` trimmed, or `placeholder` when it is blank.
pub fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("  ", NOT_PROVIDED), "Not provided");
        assert_eq!(or_placeholder(" Ada ", NOT_PROVIDED), "Ada");
    }
}
