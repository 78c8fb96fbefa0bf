use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer"
    }))
}

/// GET /
/// Static pointer to the analysis endpoint.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Resume Analyzer API. POST a resume_file and job_description to /analyze/."
    }))
}
