//! Axum route handlers for the Enhancement API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enhancement::enhance_resume;
use crate::enhancement::suggestions::{EnhancementSuggestion, EnhancementType};
use crate::errors::AppError;
use crate::models::ResumeData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub enhancement_type: EnhancementType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub success: bool,
    pub suggestions: Vec<EnhancementSuggestion>,
    pub enhancement_type: EnhancementType,
    /// RFC 3339
    pub timestamp: String,
}

/// POST /api/enhance-resume
pub async fn handle_enhance_resume(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let resume = request
        .resume_data
        .ok_or_else(|| AppError::Validation("Resume data is required".to_string()))?;

    let suggestions = enhance_resume(state.llm.as_ref(), &resume, request.enhancement_type).await;

    Ok(Json(EnhanceResponse {
        success: true,
        suggestions,
        enhancement_type: request.enhancement_type,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
