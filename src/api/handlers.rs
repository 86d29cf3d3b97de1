//! API request handlers
//!
//! Handlers for the upload form, the JSON API and the raw download endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use uuid::Uuid;

use crate::batch::{process_batch, BatchOutcome, Upload};
use crate::error::{ForgeError, ForgeResult};
use crate::excel::XLSX_MIME;
use crate::types::{ExpansionReport, Placement};

use super::pages;
use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// API index response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Upload form
pub async fn index() -> Html<String> {
    Html(pages::upload_page())
}

/// GET /api - API index
pub async fn api_index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Rulesheet Forge API Server".to_string(),
        version: state.version.clone(),
        description: "Duplicates Rules-Header rows as GF/INSERT variants".to_string(),
        endpoints: vec![
            EndpointInfo::new("/", "GET", "Upload form"),
            EndpointInfo::new("/upload", "POST", "Process uploaded workbooks, HTML downloads"),
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new("/api/v1/expand", "POST", "Process uploaded workbooks, JSON results"),
            EndpointInfo::new(
                "/api/v1/expand/download",
                "POST",
                "Process one workbook and return the .xlsx",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "upload".to_string(),
            "expand".to_string(),
            "download".to_string(),
        ],
    }))
}

/// Files and options extracted from a multipart request
#[derive(Debug)]
pub struct UploadForm {
    pub uploads: Vec<Upload>,
    pub placement: Placement,
}

/// Read `files` / `file` parts and an optional `placement` part.
///
/// File parts without a filename (an empty file input) are skipped.
pub async fn read_upload_form(mut multipart: Multipart) -> ForgeResult<UploadForm> {
    let mut uploads = Vec::new();
    let mut placement = Placement::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ForgeError::Upload(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("placement") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ForgeError::Upload(e.to_string()))?;
                placement = text.parse().map_err(ForgeError::Upload)?;
            }
            Some("files") | Some("file") => {
                let filename = match field.file_name() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => continue,
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ForgeError::Upload(e.to_string()))?;
                uploads.push(Upload::new(filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(UploadForm { uploads, placement })
}

/// Run the batch off the async runtime
async fn run_batch(form: UploadForm) -> ForgeResult<Vec<BatchOutcome>> {
    let UploadForm { uploads, placement } = form;
    tokio::task::spawn_blocking(move || process_batch(uploads, placement))
        .await
        .map_err(|e| ForgeError::Upload(format!("Processing task failed: {}", e)))
}

/// POST /upload - Process uploaded workbooks and render download links
pub async fn upload(multipart: Multipart) -> Response {
    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Html(pages::error_page(&e))).into_response();
        }
    };
    let placement = form.placement;

    match run_batch(form).await {
        Ok(outcomes) => Html(pages::results_page(placement, &outcomes)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error_page(&e))).into_response(),
    }
}

/// Per-file result in the JSON API
#[derive(Serialize, Default)]
pub struct FileResult {
    pub filename: String,
    pub expanded: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ExpansionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_base64: Option<String>,
}

impl From<BatchOutcome> for FileResult {
    fn from(outcome: BatchOutcome) -> Self {
        match outcome.result {
            Ok(file) => FileResult {
                filename: outcome.source,
                expanded: true,
                message: "Expansion completed".to_string(),
                output_filename: Some(file.filename),
                error_kind: None,
                content_base64: Some(STANDARD.encode(&file.bytes)),
                report: Some(file.report),
            },
            Err(e) => FileResult {
                filename: outcome.source,
                expanded: false,
                message: e.to_string(),
                error_kind: Some(e.kind().to_string()),
                ..Default::default()
            },
        }
    }
}

/// Expand response
#[derive(Serialize, Default)]
pub struct ExpandResponse {
    pub placement: String,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<FileResult>,
}

impl ExpandResponse {
    pub fn new(placement: Placement, outcomes: Vec<BatchOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;
        Self {
            placement: placement.to_string(),
            succeeded,
            failed,
            files: outcomes.into_iter().map(FileResult::from).collect(),
        }
    }
}

/// POST /api/v1/expand - Process uploaded workbooks, JSON results
pub async fn expand(multipart: Multipart) -> Response {
    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, &e),
    };
    let placement = form.placement;

    match run_batch(form).await {
        Ok(outcomes) => Json(ApiResponse::ok(ExpandResponse::new(placement, outcomes))).into_response(),
        Err(e) => error_json(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

/// POST /api/v1/expand/download - Process exactly one workbook, return the .xlsx
pub async fn expand_download(multipart: Multipart) -> Response {
    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, &e),
    };

    if form.uploads.len() != 1 {
        let e = ForgeError::Upload(format!(
            "Expected exactly one file, got {}",
            form.uploads.len()
        ));
        return error_json(StatusCode::BAD_REQUEST, &e);
    }

    let outcome = match run_batch(form).await {
        Ok(mut outcomes) => outcomes.remove(0),
        Err(e) => return error_json(StatusCode::INTERNAL_SERVER_ERROR, &e),
    };

    match outcome.result {
        Ok(file) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    content_disposition(&file.filename),
                ),
            ],
            file.bytes,
        )
            .into_response(),
        Err(e) => error_json(StatusCode::UNPROCESSABLE_ENTITY, &e),
    }
}

fn error_json(status: StatusCode, error: &ForgeError) -> Response {
    (status, Json(ApiResponse::<ExpandResponse>::err(error.to_string()))).into_response()
}

/// `attachment` disposition with a quoted-string-safe filename
pub fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}
