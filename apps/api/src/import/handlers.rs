//! Axum route handlers for the Import API.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::import::extract::{
    clean_extracted_text, clean_extracted_text_flat, count_pdf_pages, extract_text, DocumentKind, ExtractError,
};
use crate::import::pipeline::{import_text, ImportOutcome};
use crate::import::structure::{structure_with_ai, IMPORT_TEXT_LIMIT, PARSE_PDF_TEXT_LIMIT};
use crate::models::ResumeData;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// The `file` part of a multipart upload.
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

impl Upload {
    fn kind(&self) -> Result<DocumentKind, ExtractError> {
        DocumentKind::detect(self.file_name.as_deref(), self.content_type.as_deref())
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation("No file provided".to_string()))
}

/// Runs extraction off the async executor. A panic inside the PDF parser is
/// reported as unreadable text.
async fn extract_blocking(
    bytes: Bytes,
    kind: DocumentKind,
    limit: usize,
) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, kind, limit))
        .await
        .map_err(|e| {
            warn!("Text extraction aborted: {e}");
            AppError::from(ExtractError::NoReadableText)
        })??;
    Ok(text)
}

#[derive(Debug, Serialize)]
pub struct PdfInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsePdfResponse {
    pub text: String,
    pub structured_data: Option<ResumeData>,
    pub pages: usize,
    pub info: PdfInfo,
}

/// POST /api/parse-pdf
pub async fn handle_parse_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsePdfResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    if upload.kind()? != DocumentKind::Pdf {
        return Err(AppError::UnsupportedMediaType(
            "Only PDF files are supported".to_string(),
        ));
    }

    let pages = count_pdf_pages(&upload.bytes);
    let title = upload
        .file_name
        .as_deref()
        .map(|name| name.rsplit_once('.').map_or(name, |(stem, _)| stem))
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or("Resume")
        .to_string();

    let text = extract_blocking(
        upload.bytes,
        DocumentKind::Pdf,
        state.config.max_upload_bytes,
    )
    .await?;
    let text = clean_extracted_text_flat(&text);
    info!("Parsed PDF '{title}': {pages} page(s), {} chars", text.chars().count());

    let structured_data = structure_with_ai(state.llm.as_ref(), &text, PARSE_PDF_TEXT_LIMIT).await;

    Ok(Json(ParsePdfResponse {
        text,
        structured_data,
        pages,
        info: PdfInfo {
            title,
            author: String::new(),
            subject: String::new(),
        },
    }))
}

/// POST /api/import
pub async fn handle_import_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportOutcome>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let kind = upload.kind()?;
    info!(
        "Importing {:?} upload '{}' ({} bytes)",
        kind,
        upload.file_name.as_deref().unwrap_or("unnamed"),
        upload.bytes.len()
    );

    let text = extract_blocking(upload.bytes, kind, state.config.max_upload_bytes).await?;
    let outcome = import_text(state.llm.as_ref(), &text, IMPORT_TEXT_LIMIT).await;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct ImportTextRequest {
    pub text: Option<String>,
}

/// POST /api/import/text
pub async fn handle_import_text(
    State(state): State<AppState>,
    Json(request): Json<ImportTextRequest>,
) -> Result<Json<ImportOutcome>, AppError> {
    let text = request
        .text
        .map(|t| clean_extracted_text(&t))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Resume text is required".to_string()))?;

    let outcome = import_text(state.llm.as_ref(), &text, IMPORT_TEXT_LIMIT).await;
    Ok(Json(outcome))
}
