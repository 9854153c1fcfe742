//! Axum route handlers for the Render API.

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::{ResumeData, ResumeTemplate};
use crate::render::{export_file_name, render_resume, template_catalog, TemplateInfo};

pub const EXPORT_FILE_NAME_HEADER: &str = "x-export-file-name";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub template: Option<ResumeTemplate>,
}

/// GET /api/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(template_catalog())
}

/// POST /api/render
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Result<Response, AppError> {
    let resume = request
        .resume_data
        .ok_or_else(|| AppError::Validation("Resume data is required".to_string()))?;
    let template = request.template.unwrap_or(resume.selected_template);

    let html = render_resume(&resume, Some(template))?;
    let file_name = export_file_name(&resume, template);
    debug!("Rendered '{}' ({} bytes)", file_name, html.len());

    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&file_name) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(EXPORT_FILE_NAME_HEADER), value);
        }
        Err(_) => warn!("Export file name '{file_name}' is not a valid header value; omitting it"),
    }

    Ok((headers, Html(html)).into_response())
}
