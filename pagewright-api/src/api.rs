use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use pagewright::writer::encode_winansi_literal;
use pagewright::{
    Destination, Dictionary, Document, DocumentOptions, Object, PageOptions, PdfError,
    ResourceKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Request payload for the text endpoint
#[derive(Debug, Deserialize)]
pub struct CreatePdfRequest {
    /// Text content, one PDF line per input line
    pub text: String,
    /// Font size in points (defaults to 24.0 if not specified)
    pub font_size: Option<f64>,
    /// Document options, same shape as the CLI's `--config` file
    #[serde(default)]
    pub options: DocumentOptions,
}

/// One page of a [`BuildPdfRequest`]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// Page size and layout; the document default when absent
    pub page: Option<PageOptions>,
    /// Content stream operators, one per line
    pub content: Vec<String>,
    /// Named destinations pointing at the top of this page
    pub destinations: Vec<String>,
}

/// Request payload for the raw build endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BuildPdfRequest {
    pub options: DocumentOptions,
    pub pages: Vec<PageRequest>,
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// Application-specific error types for the API
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Pdf(#[from] PdfError),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Pdf(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error_response = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(error_response)).into_response()
    }
}

/// Build the application router with all routes configured
pub fn app() -> Router {
    Router::new()
        .route("/api/create", post(create_pdf))
        .route("/api/build", post(build_pdf))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn pdf_response(pdf_bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            ("Content-Type", "application/pdf"),
            (
                "Content-Disposition",
                "attachment; filename=\"generated.pdf\"",
            ),
        ],
        pdf_bytes,
    )
        .into_response()
}

/// Create a PDF document from the provided text content
pub async fn create_pdf(Json(payload): Json<CreatePdfRequest>) -> Result<Response, AppError> {
    let font_size = payload.font_size.unwrap_or(24.0);
    if !(font_size.is_finite() && font_size > 0.0) {
        return Err(AppError::BadRequest(format!(
            "font_size must be positive, got {font_size}"
        )));
    }

    let mut options = payload.options;
    options.auto_first_page = true;
    let mut doc = Document::new(Vec::new(), options)?;

    let mut font = Dictionary::new();
    font.set("Type", Object::name("Font"));
    font.set("Subtype", Object::name("Type1"));
    font.set("BaseFont", Object::name("Helvetica"));
    font.set("Encoding", Object::name("WinAnsiEncoding"));
    let font = doc.reference(font)?;
    doc.page_resource(ResourceKind::Font)?.set("F1", font);
    doc.end_object(font, None)?;

    let (left, top) = match doc.current_page() {
        Some(page) => (page.margins().left, page.height() - page.margins().top),
        None => return Err(AppError::BadRequest("document has no page".to_string())),
    };

    doc.add_content("BT")?;
    doc.add_content(&format!("/F1 {font_size} Tf {} TL", font_size * 1.2))?;
    doc.add_content(&format!("{left} {} Td", top - font_size))?;
    for line in payload.text.lines() {
        let mut operator = encode_winansi_literal(line);
        operator.extend_from_slice(b" Tj T*\n");
        doc.write_content(&operator)?;
    }
    doc.add_content("ET")?;
    doc.end()?;

    let pdf_bytes = doc.into_inner()?;
    debug!(bytes = pdf_bytes.len(), "text document generated");
    Ok(pdf_response(pdf_bytes))
}

/// Build a document from raw page content
pub async fn build_pdf(Json(payload): Json<BuildPdfRequest>) -> Result<Response, AppError> {
    if payload.pages.is_empty() {
        return Err(AppError::BadRequest("at least one page is required".to_string()));
    }

    let mut options = payload.options;
    options.auto_first_page = false;
    let mut doc = Document::new(Vec::new(), options)?;

    for page in &payload.pages {
        match &page.page {
            Some(page_options) => doc.add_page_with(page_options.clone())?,
            None => doc.add_page()?,
        };
        for line in &page.content {
            doc.add_content(line)?;
        }
        for name in &page.destinations {
            doc.add_named_destination(name.clone(), Destination::xyz(0.0, 0.0, None))?;
        }
    }
    doc.end()?;

    let pdf_bytes = doc.into_inner()?;
    debug!(
        pages = payload.pages.len(),
        bytes = pdf_bytes.len(),
        "document built"
    );
    Ok(pdf_response(pdf_bytes))
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pagewright API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
