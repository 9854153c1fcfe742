//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::analyze_resume;
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::models::ResumeData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_data: Option<ResumeData>,
}

/// POST /api/analyze-resume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let resume = request
        .resume_data
        .ok_or_else(|| AppError::Validation("Resume data is required".to_string()))?;

    let report = analyze_resume(state.llm.as_ref(), &resume).await;
    Ok(Json(report))
}
