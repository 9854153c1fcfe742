// Resume enhancement: model-backed rewrite suggestions with a local fallback.

pub mod handlers;
pub mod prompts;
pub mod suggestions;

use tracing::{info, warn};

use crate::llm_client::{generate_json, TextGenerator};
use crate::models::ResumeData;

use self::prompts::build_enhancement_prompt;
use self::suggestions::{
    fallback_suggestions, EnhancementSuggestion, EnhancementType, SuggestionEnvelope,
};

/// Asks the model for suggestions. A failed call or an empty list degrades to
/// `fallback_suggestions`.
pub async fn enhance_resume(
    llm: &dyn TextGenerator,
    resume: &ResumeData,
    kind: EnhancementType,
) -> Vec<EnhancementSuggestion> {
    let prompt = build_enhancement_prompt(resume, kind);
    match generate_json::<SuggestionEnvelope>(llm, &prompt).await {
        Ok(envelope) if !envelope.suggestions.is_empty() => {
            info!(
                "Enhancement produced {} suggestions from model",
                envelope.suggestions.len()
            );
            envelope.suggestions
        }
        Ok(_) => {
            warn!("Model returned no enhancement suggestions; using local fallback");
            fallback_suggestions(resume, kind)
        }
        Err(e) => {
            warn!("Enhancement falling back to local suggestions: {e}");
            fallback_suggestions(resume, kind)
        }
    }
}
