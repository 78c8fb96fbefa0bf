use std::sync::Arc;

use crate::analysis::documents::DocumentParser;
use crate::analysis::keywords::KeywordService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub documents: DocumentParser,
    pub keywords: Arc<KeywordService>,
}
