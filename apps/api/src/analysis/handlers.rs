//! Axum route handlers for the Analysis API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::comparator::{compare_keywords, ComparisonResult};
use crate::analysis::documents::DocumentFormat;
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume_file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Form parsing
// ────────────────────────────────────────────────────────────────────────────

/// Raw multipart fields, before validation.
#[derive(Default)]
struct AnalyzeForm {
    resume: Option<(Option<String>, Bytes)>,
    job_description: Option<String>,
}

/// A resume upload that passed filename validation.
#[derive(Debug)]
struct ResumeUpload {
    filename: String,
    format: DocumentFormat,
    bytes: Bytes,
}

async fn read_analyze_form(multipart: &mut Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some(RESUME_FIELD) => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.resume = Some((filename, bytes));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart form: {}", e.body_text()))
    }
}

fn validate_upload(resume: Option<(Option<String>, Bytes)>) -> Result<ResumeUpload, AppError> {
    let (filename, bytes) = resume.ok_or_else(|| {
        AppError::Validation(format!("Missing '{RESUME_FIELD}' field in multipart form"))
    })?;

    let filename = filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No resume file name found.".to_string()))?;

    let format = DocumentFormat::from_filename(&filename).ok_or_else(|| {
        AppError::Validation("Invalid file type. Please upload a PDF or DOCX file.".to_string())
    })?;

    Ok(ResumeUpload {
        filename,
        format,
        bytes,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze/
///
/// Multipart form: `resume_file` (PDF or DOCX) and `job_description` (text).
/// Extracts keywords from both and reports matched/missing job keywords plus a score.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ComparisonResult>, AppError> {
    let request_id = Uuid::new_v4();

    let form = read_analyze_form(&mut multipart).await?;
    let upload = validate_upload(form.resume)?;
    let job_description = form.job_description.ok_or_else(|| {
        AppError::Validation(format!(
            "Missing '{JOB_DESCRIPTION_FIELD}' field in multipart form"
        ))
    })?;

    info!(
        %request_id,
        filename = %upload.filename,
        format = upload.format.as_str(),
        bytes = upload.bytes.len(),
        "Analyzing resume"
    );

    // Document parsing is CPU-bound; keep it off the async workers.
    let documents = state.documents.clone();
    let ResumeUpload {
        filename,
        format,
        bytes,
    } = upload;
    let resume_text =
        tokio::task::spawn_blocking(move || documents.extract_text(&bytes, format))
            .await
            .context("Resume text extraction task failed")?
            .map_err(|source| AppError::Extraction {
                filename: filename.clone(),
                source,
            })?;

    if resume_text.trim().is_empty() {
        warn!(%request_id, filename = %filename, "Resume parsed but produced no text");
        return Err(AppError::UnprocessableEntity(format!(
            "The resume file '{filename}' contains no extractable text."
        )));
    }

    let keywords = state.keywords.clone();
    let (resume_keywords, job_keywords) = tokio::task::spawn_blocking(move || {
        (
            keywords.extract(&resume_text),
            keywords.extract(&job_description),
        )
    })
    .await
    .context("Keyword extraction task failed")?;

    let result = compare_keywords(resume_keywords, job_keywords);

    info!(
        %request_id,
        match_score = result.match_score,
        matched = result.matched_keywords.len(),
        missing = result.missing_keywords.len(),
        "Analysis complete"
    );

    Ok(Json(result))
}
