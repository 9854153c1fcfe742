//! Axum route handlers for the Job Match API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::job_match::match_job;
use crate::job_match::report::JobMatchReport;
use crate::models::ResumeData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchRequest {
    pub resume_data: Option<ResumeData>,
    pub job_description: Option<String>,
}

/// POST /api/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<JobMatchReport>, AppError> {
    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty());
    let (Some(resume), Some(job_description)) = (request.resume_data, job_description) else {
        return Err(AppError::Validation(
            "Resume data and job description are required".to_string(),
        ));
    };

    let report = match_job(state.llm.as_ref(), &resume, &job_description).await;
    Ok(Json(report))
}
