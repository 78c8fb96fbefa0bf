//! Keyword extraction: turns plain text into a normalized `KeywordSet`.
//!
//! `KeywordService` is built once at startup and shared read-only across
//! requests. Entity extraction is an optional capability; when it is not
//! configured it contributes nothing to the combined set.

pub mod entities;
pub mod stopwords;
pub mod yake;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analysis::comparator::KeywordSet;
use crate::config::Config;
use entities::ProperNounEntityExtractor;
use yake::{YakeConfig, YakeExtractor};

/// Statistical keyword extractor. Implementations are CPU-bound and synchronous.
pub trait KeywordExtractor: Send + Sync {
    fn extract(&self, text: &str) -> KeywordSet;

    fn name(&self) -> &str;
}

/// Optional entity extractor (organizations, products, people).
pub trait EntityExtractor: Send + Sync {
    fn extract_entities(&self, text: &str) -> KeywordSet;

    fn name(&self) -> &str;
}

pub struct KeywordService {
    statistical: Arc<dyn KeywordExtractor>,
    entities: Option<Arc<dyn EntityExtractor>>,
}

impl KeywordService {
    pub fn new(
        statistical: Arc<dyn KeywordExtractor>,
        entities: Option<Arc<dyn EntityExtractor>>,
    ) -> Self {
        Self {
            statistical,
            entities,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let yake = YakeExtractor::new(YakeConfig {
            max_ngram: config.keyword_max_ngram,
            top: config.keyword_top,
            dedup_limit: config.keyword_dedup_limit,
            window: config.keyword_window,
        })
        .context("Failed to build statistical keyword extractor")?;

        let entities: Option<Arc<dyn EntityExtractor>> = if config.enable_entity_extraction {
            let extractor = ProperNounEntityExtractor::new()
                .context("Failed to build entity extractor")?;
            Some(Arc::new(extractor))
        } else {
            None
        };

        Ok(Self::new(Arc::new(yake), entities))
    }

    pub fn has_entity_extraction(&self) -> bool {
        self.entities.is_some()
    }

    /// Human-readable backend summary for startup logs.
    pub fn describe(&self) -> String {
        match &self.entities {
            Some(entities) => format!("{} + {}", self.statistical.name(), entities.name()),
            None => self.statistical.name().to_string(),
        }
    }

    /// Statistical keywords, unioned with entities when that capability is enabled.
    pub fn extract(&self, text: &str) -> KeywordSet {
        if text.trim().is_empty() {
            return KeywordSet::new();
        }
        let mut keywords = self.statistical.extract(text);
        if let Some(entities) = &self.entities {
            keywords.extend(entities.extract_entities(text));
        }
        keywords
    }
}
