use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on the multipart request body, in bytes.
    pub max_upload_bytes: usize,
    pub keyword_max_ngram: usize,
    pub keyword_top: usize,
    pub keyword_dedup_limit: f64,
    pub keyword_window: usize,
    pub enable_entity_extraction: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            keyword_max_ngram: parse_or(&lookup, "KEYWORD_MAX_NGRAM", 3)?,
            keyword_top: parse_or(&lookup, "KEYWORD_TOP", 30)?,
            keyword_dedup_limit: parse_or(&lookup, "KEYWORD_DEDUP_LIMIT", 0.9)?,
            keyword_window: parse_or(&lookup, "KEYWORD_WINDOW", 1)?,
            enable_entity_extraction: parse_or(&lookup, "ENABLE_ENTITY_EXTRACTION", false)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.keyword_max_ngram == 0 {
            bail!("KEYWORD_MAX_NGRAM must be at least 1");
        }
        if self.keyword_top == 0 {
            bail!("KEYWORD_TOP must be at least 1");
        }
        if self.keyword_window == 0 {
            bail!("KEYWORD_WINDOW must be at least 1");
        }
        if !(self.keyword_dedup_limit > 0.0 && self.keyword_dedup_limit <= 1.0) {
            bail!("KEYWORD_DEDUP_LIMIT must be in (0, 1]");
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.keyword_max_ngram, 3);
        assert_eq!(config.keyword_top, 30);
        assert!((config.keyword_dedup_limit - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.keyword_window, 1);
        assert!(!config.enable_entity_extraction);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("KEYWORD_TOP", "12"),
            ("ENABLE_ENTITY_EXTRACTION", "true"),
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.keyword_top, 12);
        assert!(config.enable_entity_extraction);
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let config = config_from(&[("PORT", "  ")]).unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_dedup_limit_out_of_range_is_rejected() {
        assert!(config_from(&[("KEYWORD_DEDUP_LIMIT", "1.5")]).is_err());
        assert!(config_from(&[("KEYWORD_DEDUP_LIMIT", "0")]).is_err());
    }

    #[test]
    fn test_zero_ngram_is_rejected() {
        assert!(config_from(&[("KEYWORD_MAX_NGRAM", "0")]).is_err());
    }
}
