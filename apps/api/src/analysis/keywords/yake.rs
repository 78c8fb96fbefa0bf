//! YAKE-style statistical keyphrase extraction.
//!
//! Unsupervised and corpus-free: every term is scored from features of the
//! single input text (casing, position, frequency, context relatedness and
//! sentence spread), candidate n-grams are scored from their terms, and the
//! lowest-scoring candidates win after near-duplicate suppression.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::analysis::comparator::{normalize_keywords, KeywordSet};
use crate::analysis::keywords::{stopwords, KeywordExtractor};

const TOKEN_PATTERN: &str =
    r"[\p{L}\p{N}][\p{L}\p{N}+#]*(?:[.\-/'][\p{L}\p{N}][\p{L}\p{N}+#]*)*";
/// Sentence terminators followed by whitespace, line breaks, and bullet glyphs.
const SENTENCE_PATTERN: &str = r"[.!?;]+\s+|[.!?;]+$|[\r\n]+|[•·▪●◦]";

/// Terms shorter than this are treated like stopwords.
const MIN_TERM_CHARS: usize = 3;

#[derive(Debug, Clone)]
pub struct YakeConfig {
    /// Longest candidate phrase, in tokens.
    pub max_ngram: usize,
    /// Number of keywords returned.
    pub top: usize,
    /// Candidates at least this similar to an already-selected keyword are dropped.
    /// 1.0 disables suppression.
    pub dedup_limit: f64,
    /// Co-occurrence window, in tokens.
    pub window: usize,
}

impl Default for YakeConfig {
    fn default() -> Self {
        Self {
            max_ngram: 3,
            top: 30,
            dedup_limit: 0.9,
            window: 1,
        }
    }
}

/// A candidate keyword with its YAKE score. Lower is more relevant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKeyword {
    pub keyword: String,
    pub score: f64,
}

pub struct YakeExtractor {
    config: YakeConfig,
    stopwords: HashSet<&'static str>,
    token_re: Regex,
    sentence_re: Regex,
}

struct Token<'a> {
    raw: &'a str,
    key: String,
}

#[derive(Default)]
struct TermStats {
    tf: usize,
    tf_upper: usize,
    tf_acronym: usize,
    sentence_ids: Vec<usize>,
    left: HashMap<String, usize>,
    right: HashMap<String, usize>,
    stopword: bool,
}

struct Candidate {
    terms: Vec<String>,
    tf: usize,
}

impl YakeExtractor {
    pub fn new(config: YakeConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            config,
            stopwords: stopwords::english(),
            token_re: Regex::new(TOKEN_PATTERN)?,
            sentence_re: Regex::new(SENTENCE_PATTERN)?,
        })
    }

    /// Returns up to `top` keywords ordered from most to least relevant.
    pub fn rank(&self, text: &str) -> Vec<ScoredKeyword> {
        let sentences = self.tokenize(text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let (terms, adjacency) = self.collect_term_stats(&sentences);
        let weights = term_weights(&terms, sentences.len());
        let candidates = self.collect_candidates(&sentences);

        let mut scored: Vec<ScoredKeyword> = candidates
            .into_iter()
            .map(|(keyword, candidate)| {
                let score = candidate_score(&candidate, &terms, &weights, &adjacency);
                ScoredKeyword { keyword, score }
            })
            .collect();
        scored.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });

        self.select(scored)
    }

    fn is_stopword(&self, key: &str) -> bool {
        self.stopwords.contains(key) || key.chars().count() < MIN_TERM_CHARS
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Vec<Token<'a>>> {
        self.sentence_re
            .split(text)
            .map(|sentence| {
                self.token_re
                    .find_iter(sentence)
                    .map(|m| Token {
                        raw: m.as_str(),
                        key: m.as_str().to_lowercase(),
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect()
    }

    fn collect_term_stats(
        &self,
        sentences: &[Vec<Token<'_>>],
    ) -> (HashMap<String, TermStats>, HashMap<(String, String), usize>) {
        let mut terms: HashMap<String, TermStats> = HashMap::new();
        let mut adjacency: HashMap<(String, String), usize> = HashMap::new();

        for (sentence_id, tokens) in sentences.iter().enumerate() {
            for (pos, token) in tokens.iter().enumerate() {
                let stopword = self.is_stopword(&token.key);
                let stats = terms.entry(token.key.clone()).or_insert_with(|| TermStats {
                    stopword,
                    ..TermStats::default()
                });
                stats.tf += 1;
                if is_acronym(token.raw) {
                    stats.tf_acronym += 1;
                } else if pos > 0 && starts_uppercase(token.raw) {
                    stats.tf_upper += 1;
                }
                stats.sentence_ids.push(sentence_id);

                for back in 1..=self.config.window.min(pos) {
                    let left_key = &tokens[pos - back].key;
                    if let Some(stats) = terms.get_mut(&token.key) {
                        *stats.left.entry(left_key.clone()).or_default() += 1;
                    }
                    if let Some(left) = terms.get_mut(left_key) {
                        *left.right.entry(token.key.clone()).or_default() += 1;
                    }
                }

                if pos > 0 {
                    *adjacency
                        .entry((tokens[pos - 1].key.clone(), token.key.clone()))
                        .or_default() += 1;
                }
            }
        }

        (terms, adjacency)
    }

    fn collect_candidates(&self, sentences: &[Vec<Token<'_>>]) -> HashMap<String, Candidate> {
        let mut candidates: HashMap<String, Candidate> = HashMap::new();

        for tokens in sentences {
            for start in 0..tokens.len() {
                if self.is_stopword(&tokens[start].key) || is_number(tokens[start].raw) {
                    continue;
                }
                for end in start + 1..=(start + self.config.max_ngram).min(tokens.len()) {
                    let last = &tokens[end - 1];
                    if is_number(last.raw) {
                        break;
                    }
                    if self.is_stopword(&last.key) {
                        continue;
                    }
                    let keys: Vec<String> =
                        tokens[start..end].iter().map(|t| t.key.clone()).collect();
                    candidates
                        .entry(keys.join(" "))
                        .or_insert_with(|| Candidate {
                            terms: keys,
                            tf: 0,
                        })
                        .tf += 1;
                }
            }
        }

        candidates
    }

    fn select(&self, ranked: Vec<ScoredKeyword>) -> Vec<ScoredKeyword> {
        let mut selected: Vec<ScoredKeyword> = Vec::with_capacity(self.config.top);
        for candidate in ranked {
            if selected.len() >= self.config.top {
                break;
            }
            let duplicate = self.config.dedup_limit < 1.0
                && selected.iter().any(|kept| {
                    strsim::normalized_levenshtein(&kept.keyword, &candidate.keyword)
                        >= self.config.dedup_limit
                });
            if !duplicate {
                selected.push(candidate);
            }
        }
        selected
    }
}

impl KeywordExtractor for YakeExtractor {
    fn extract(&self, text: &str) -> KeywordSet {
        normalize_keywords(self.rank(text).into_iter().map(|kw| kw.keyword))
    }

    fn name(&self) -> &str {
        "yake"
    }
}

/// Per-term relevance weight H. Lower means more important.
fn term_weights(terms: &HashMap<String, TermStats>, sentence_count: usize) -> HashMap<String, f64> {
    let mut valid_tfs: Vec<f64> = terms
        .values()
        .filter(|t| !t.stopword)
        .map(|t| t.tf as f64)
        .collect();
    // fixed summation order keeps scores bit-identical across calls
    valid_tfs.sort_by(f64::total_cmp);
    let (mean_tf, std_tf) = mean_and_std(&valid_tfs);
    let max_tf = terms.values().map(|t| t.tf).max().unwrap_or(1) as f64;

    terms
        .iter()
        .map(|(key, t)| {
            let tf = t.tf as f64;
            let casing = t.tf_upper.max(t.tf_acronym) as f64 / (1.0 + tf.ln());
            let position = (3.0 + median(&t.sentence_ids)).ln().ln();
            let freq_norm = if mean_tf + std_tf > 0.0 {
                tf / (mean_tf + std_tf)
            } else {
                0.0
            };
            let spread = distinct_count(&t.sentence_ids) as f64 / sentence_count as f64;
            let relatedness = (0.5 + context_dispersion(&t.left) * (tf / max_tf))
                + (0.5 + context_dispersion(&t.right) * (tf / max_tf));

            let h = (position * relatedness)
                / (casing + freq_norm / relatedness + spread / relatedness);
            (key.clone(), h)
        })
        .collect()
}

fn candidate_score(
    candidate: &Candidate,
    terms: &HashMap<String, TermStats>,
    weights: &HashMap<String, f64>,
    adjacency: &HashMap<(String, String), usize>,
) -> f64 {
    let mut product = 1.0_f64;
    let mut sum = 0.0_f64;

    for (i, key) in candidate.terms.iter().enumerate() {
        let stopword = terms.get(key).map(|t| t.stopword).unwrap_or(false);
        if !stopword {
            let h = weights.get(key).copied().unwrap_or(1.0);
            product *= h;
            sum += h;
            continue;
        }
        // Interior stopword: penalize by how loosely it binds its neighbours.
        let prob_prev = i
            .checked_sub(1)
            .map(|p| bond_probability(&candidate.terms[p], key, terms, adjacency, true))
            .unwrap_or(0.0);
        let prob_next = candidate
            .terms
            .get(i + 1)
            .map(|n| bond_probability(key, n, terms, adjacency, false))
            .unwrap_or(0.0);
        let prob = prob_prev * prob_next;
        product *= 2.0 - prob;
        sum -= 1.0 - prob;
    }

    let denominator = candidate.tf as f64 * (1.0 + sum).max(f64::EPSILON);
    product / denominator
}

/// Share of occurrences of the outer term that sit directly next to the inner one.
fn bond_probability(
    left: &str,
    right: &str,
    terms: &HashMap<String, TermStats>,
    adjacency: &HashMap<(String, String), usize>,
    left_is_outer: bool,
) -> f64 {
    let outer = if left_is_outer { left } else { right };
    let outer_tf = terms.get(outer).map(|t| t.tf).unwrap_or(0);
    if outer_tf == 0 {
        return 0.0;
    }
    let pair = adjacency
        .get(&(left.to_string(), right.to_string()))
        .copied()
        .unwrap_or(0);
    pair as f64 / outer_tf as f64
}

fn context_dispersion(context: &HashMap<String, usize>) -> f64 {
    let total: usize = context.values().sum();
    if total == 0 {
        0.0
    } else {
        context.len() as f64 / total as f64
    }
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn median(ids: &[usize]) -> f64 {
    if ids.is_empty() {
        return 0.0;
    }
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

fn distinct_count(ids: &[usize]) -> usize {
    ids.iter().collect::<HashSet<_>>().len()
}

fn is_acronym(raw: &str) -> bool {
    raw.chars().filter(|c| c.is_alphabetic()).count() > 1
        && raw
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}

fn starts_uppercase(raw: &str) -> bool {
    raw.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn is_number(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/' | '+' | '%'))
}
