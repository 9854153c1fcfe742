//! Document import: text extraction, heuristic and model-backed parsing, and
//! the fallback chain that combines them.

pub mod dates;
pub mod extract;
pub mod handlers;
pub mod heuristic;
pub mod pipeline;
pub mod prompts;
pub mod structure;

/// First `max` chars of `text`, never splitting a character.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
