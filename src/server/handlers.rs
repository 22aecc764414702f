//! HTTP request handlers for API endpoints
use crate::ooxml::docx::{Package, ReplaceReport, ReplacementMap, apply_replacements, extract_text as extract_document_text};
use crate::ooxml::opc::constants::content_type;
use crate::server::error::ApiError;
use axum::Json;
use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::info;

/// Name used when the upload carries no filename.
pub const DEFAULT_FILENAME: &str = "document.docx";

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

struct UploadedFile {
    filename: Option<String>,
    bytes: Bytes,
}

/// The multipart fields the handlers understand. Unknown fields are skipped.
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    text_map: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await?;
                    form.file = Some(UploadedFile { filename, bytes });
                },
                Some("text_map") => form.text_map = Some(field.text().await?),
                _ => {},
            }
        }
        Ok(form)
    }
}

/// Apply `map` to a `.docx` held in memory.
fn edit_document(data: &[u8], map: &ReplacementMap) -> Result<(Vec<u8>, ReplaceReport), ApiError> {
    let mut package = Package::from_bytes(data).map_err(ApiError::InvalidDocument)?;
    let report =
        apply_replacements(package.document_mut(), map).map_err(ApiError::InvalidDocument)?;
    let bytes = package.to_bytes().map_err(ApiError::Serialize)?;
    Ok((bytes, report))
}

fn document_text(data: &[u8]) -> Result<String, ApiError> {
    let package = Package::from_bytes(data).map_err(ApiError::InvalidDocument)?;
    extract_document_text(package.document()).map_err(ApiError::InvalidDocument)
}

/// `Content-Disposition` value for a download named `filename`.
///
/// Names made of printable ASCII go out as a plain `filename=` parameter.
/// Anything else uses the RFC 5987 `filename*=UTF-8''...` form.
pub fn content_disposition(filename: &str) -> String {
    let plain = filename
        .chars()
        .all(|c| (c.is_ascii_graphic() || c == ' ') && !matches!(c, '"' | '\\' | ';' | ','));
    if plain {
        format!("attachment; filename={}", filename)
    } else {
        format!(
            "attachment; filename*=UTF-8''{}",
            urlencoding::encode(filename)
        )
    }
}

/// Replace whole paragraphs of an uploaded document.
///
/// Form fields: `file` (the document) and `text_map` (JSON object mapping
/// trimmed paragraph text to replacement text).
pub async fn edit_docx(multipart: Multipart) -> Result<Response, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let file = form.file.ok_or(ApiError::MissingField("file"))?;
    let text_map = form.text_map.ok_or(ApiError::MissingField("text_map"))?;
    let map = ReplacementMap::from_json(&text_map).map_err(ApiError::InvalidTextMap)?;
    map.validate().map_err(ApiError::InvalidReplacement)?;

    let data = file.bytes;
    let (bytes, report) = tokio::task::spawn_blocking(move || edit_document(&data, &map)).await??;

    let filename = file.filename.as_deref().unwrap_or(DEFAULT_FILENAME);
    info!(
        filename,
        visited = report.visited,
        replaced = report.replaced,
        size = bytes.len(),
        "edited document"
    );

    let disposition = HeaderValue::from_str(&content_disposition(&format!("edited_{}", filename)))
        .map_err(|e| ApiError::Internal(format!("invalid Content-Disposition: {}", e)))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type::WML_DOCUMENT)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Extract the text of an uploaded document.
///
/// Form field: `file`. Responds with `{"text": "..."}`.
pub async fn extract_text(multipart: Multipart) -> Result<Json<ExtractResponse>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let file = form.file.ok_or(ApiError::MissingField("file"))?;

    let data = file.bytes;
    let text = tokio::task::spawn_blocking(move || document_text(&data)).await??;

    info!(
        filename = file.filename.as_deref().unwrap_or(DEFAULT_FILENAME),
        chars = text.chars().count(),
        "extracted text"
    );
    Ok(Json(ExtractResponse { text }))
}
