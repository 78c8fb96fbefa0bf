// Resume / job-description analysis
// Implements: document text extraction, keyword extraction, keyword comparison.
// Extraction is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod comparator;
pub mod documents;
pub mod handlers;
pub mod keywords;
