pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{analysis, enhancement, import, job_match, render};

/// Room for multipart boundaries and headers on top of the file itself, so
/// oversized files reach the extractor's own size check.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Templates
        .route("/api/templates", get(render::handlers::handle_list_templates))
        .route("/api/render", post(render::handlers::handle_render))
        // AI routes, each with a local fallback
        .route(
            "/api/analyze-resume",
            post(analysis::handlers::handle_analyze_resume),
        )
        .route(
            "/api/enhance-resume",
            post(enhancement::handlers::handle_enhance_resume),
        )
        .route("/api/job-match", post(job_match::handlers::handle_job_match))
        // Import
        .route("/api/parse-pdf", post(import::handlers::handle_parse_pdf))
        .route("/api/import", post(import::handlers::handle_import_file))
        .route("/api/import/text", post(import::handlers::handle_import_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::import::extract::tests::sample_docx;
    use crate::import::heuristic::ORIGINAL_CONTENT_TITLE;
    use crate::llm_client::stub::StubGenerator;

    const BOUNDARY: &str = "resumind-test-boundary";

    const RESUME_TEXT: &str = "Jane Doe\njane@example.com\n\nExperience\nEngineer at Acme\n2019 - 2021\n\nSkills\nRust, Go\n";

    fn router_with(llm: StubGenerator, config: Config) -> Router {
        build_router(AppState {
            llm: Arc::new(llm),
            config,
        })
    }

    fn offline_router() -> Router {
        router_with(StubGenerator::failing(), Config::default())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = offline_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["aiEnabled"], false);
    }

    #[tokio::test]
    async fn test_list_templates() {
        let response = offline_router()
            .oneshot(Request::get("/api/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(6));
        assert_eq!(body[0]["id"], "modern");
    }

    #[tokio::test]
    async fn test_render_returns_html_and_file_name() {
        let request = json_request(
            "/api/render",
            json!({
                "resumeData": {
                    "personalInfo": {"fullName": "Jane Doe"},
                    "selectedTemplate": "classic"
                },
                "template": "executive"
            }),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["x-export-file-name"],
            "Jane_Doe_executive.pdf"
        );
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("theme-executive"));
    }

    #[tokio::test]
    async fn test_analyze_falls_back_without_model() {
        let request = json_request("/api/analyze-resume", json!({"resumeData": {}}));
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["score"], 60);
    }

    #[tokio::test]
    async fn test_missing_resume_data_is_rejected() {
        for uri in ["/api/analyze-resume", "/api/enhance-resume", "/api/render"] {
            let response = offline_router()
                .oneshot(json_request(uri, json!({})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = read_json(response).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_job_match_requires_description() {
        let request = json_request(
            "/api/job-match",
            json!({"resumeData": {}, "jobDescription": "   "}),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_enhance_uses_model_suggestions() {
        let reply = r#"{"suggestions": [{"id": "kw1", "type": "keyword", "title": "Add keywords",
            "description": "d", "priority": "medium", "after": "Kubernetes"}]}"#;
        let router = router_with(StubGenerator::replying(reply), Config::default());
        let request = json_request(
            "/api/enhance-resume",
            json!({"resumeData": {}, "enhancementType": "keywords"}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["enhancementType"], "keywords");
        assert_eq!(body["suggestions"][0]["id"], "kw1");
    }

    #[tokio::test]
    async fn test_import_text_route() {
        let request = json_request("/api/import/text", json!({"text": RESUME_TEXT}));
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["source"], "heuristic");
        assert_eq!(body["resumeData"]["personalInfo"]["fullName"], "Jane Doe");

        let request = json_request("/api/import/text", json!({"text": "  "}));
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_text_file_upload() {
        let request = multipart_request(
            "/api/import",
            "file",
            "resume.txt",
            "text/plain",
            RESUME_TEXT.as_bytes(),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["resumeData"]["workExperience"][0]["company"], "Acme");
        assert_eq!(body["stages"][0], "heuristic_parse");
    }

    #[tokio::test]
    async fn test_import_rejects_legacy_word_documents() {
        let request = multipart_request(
            "/api/import",
            "file",
            "resume.doc",
            "application/msword",
            b"\xd0\xcf\x11\xe0",
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_import_docx_upload() {
        let request = multipart_request(
            "/api/import",
            "file",
            "resume.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            &sample_docx(),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["source"], "heuristic");
        assert_eq!(body["resumeData"]["personalInfo"]["fullName"], "Jane Doe");
        assert_eq!(body["resumeData"]["personalInfo"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_imported_resume_renders_without_source_dump() {
        let request = json_request("/api/import/text", json!({"text": RESUME_TEXT}));
        let response = offline_router().oneshot(request).await.unwrap();
        let imported = read_json(response).await;
        let custom_titles: Vec<&str> = imported["resumeData"]["customSections"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|section| section["title"].as_str())
            .collect();
        assert!(custom_titles.contains(&ORIGINAL_CONTENT_TITLE));

        let request = json_request(
            "/api/render",
            json!({"resumeData": imported["resumeData"].clone()}),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Jane Doe"));
        assert!(!html.contains(ORIGINAL_CONTENT_TITLE));
        assert!(!html.contains("Engineer at Acme 2019 - 2021"));
    }

    #[tokio::test]
    async fn test_null_fields_from_the_form_are_accepted() {
        let request = json_request(
            "/api/analyze-resume",
            json!({"resumeData": {
                "personalInfo": {"fullName": "Jane Doe", "email": null, "phone": null},
                "workExperience": [{"company": "Acme", "position": "Engineer",
                                    "description": null, "current": null}],
                "skills": null
            }}),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert!(body["score"].is_u64());
    }

    #[tokio::test]
    async fn test_import_without_file_field() {
        let request = multipart_request("/api/import", "other", "a.txt", "text/plain", b"hello");
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "No file provided");
    }

    #[tokio::test]
    async fn test_import_rejects_oversized_file() {
        let config = Config {
            max_upload_bytes: 16,
            ..Config::default()
        };
        let router = router_with(StubGenerator::failing(), config);
        let request = multipart_request("/api/import", "file", "cv.txt", "text/plain", &[b'a'; 100]);
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_parse_pdf_accepts_only_pdf() {
        let request = multipart_request(
            "/api/parse-pdf",
            "file",
            "resume.txt",
            "text/plain",
            RESUME_TEXT.as_bytes(),
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_parse_pdf_unreadable_file() {
        let request = multipart_request(
            "/api/parse-pdf",
            "file",
            "scan.pdf",
            "application/pdf",
            &[0x00, 0x01, 0x02, 0xff, 0xfe],
        );
        let response = offline_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Unable to parse PDF"));
    }

    #[tokio::test]
    async fn test_parse_pdf_salvaged_text_with_model() {
        let mut pdf = b"%PDF-1.4\n<< /Type /Page >>\n".to_vec();
        pdf.extend_from_slice(&[0x00, 0x9c]);
        pdf.extend_from_slice(
            b" Jane Doe Senior Software Engineer with ten years of experience in Rust",
        );
        let reply = r#"{"personalInfo": {"fullName": "Jane Doe"}, "skills": ["Rust"]}"#;
        let router = router_with(StubGenerator::replying(reply), Config::default());
        let request = multipart_request("/api/parse-pdf", "file", "jane.pdf", "application/pdf", &pdf);
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["pages"], 1);
        assert_eq!(body["info"]["title"], "jane");
        assert!(body["text"].as_str().unwrap().contains("Senior Software Engineer"));
        assert_eq!(body["structuredData"]["personalInfo"]["fullName"], "Jane Doe");
    }
}
