// Resume analysis: model-backed review with a deterministic local fallback.

pub mod handlers;
pub mod prompts;
pub mod report;

use tracing::{info, warn};

use crate::llm_client::{generate_json, TextGenerator};
use crate::models::ResumeData;

use self::prompts::build_analysis_prompt;
use self::report::{fallback_analysis, AnalysisReport};

/// Asks the model for an analysis; any failure degrades to `fallback_analysis`.
pub async fn analyze_resume(llm: &dyn TextGenerator, resume: &ResumeData) -> AnalysisReport {
    let prompt = build_analysis_prompt(resume);
    match generate_json::<AnalysisReport>(llm, &prompt).await {
        Ok(report) => {
            info!("Resume analysis produced by model (score {})", report.score);
            report
        }
        Err(e) => {
            warn!("Resume analysis falling back to local heuristics: {e}");
            fallback_analysis(resume)
        }
    }
}
