//! Comparator — set comparison between resume keywords and job-description keywords.
//!
//! Pure and deterministic: no I/O, no shared state. Inputs are coerced to sets
//! before any size is read, so duplicate-laden sequences score the same as
//! their deduplicated form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of normalized (lowercased) keywords. Iterates in lexicographic order.
pub type KeywordSet = BTreeSet<String>;

/// Outcome of comparing a resume against a job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// 0 – 100
    pub match_score: u8,
    /// Job keywords also present in the resume, sorted.
    pub matched_keywords: Vec<String>,
    /// Job keywords absent from the resume, sorted.
    pub missing_keywords: Vec<String>,
}

/// Lowercases and trims raw tokens, dropping empties, and collects them into a set.
pub fn normalize_keywords<I, S>(raw: I) -> KeywordSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|kw| kw.as_ref().trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}

/// Compares two keyword collections. Elements are taken as already normalized.
///
/// Scoring:
/// - job set non-empty → round-half-up of |matched| / |job| × 100
/// - job set empty, resume set empty → 100
/// - job set empty, resume set non-empty → 0
pub fn compare_keywords<R, J, S>(resume_keywords: R, job_keywords: J) -> ComparisonResult
where
    R: IntoIterator<Item = S>,
    J: IntoIterator<Item = S>,
    S: Into<String>,
{
    let resume: KeywordSet = resume_keywords.into_iter().map(Into::into).collect();
    let job: KeywordSet = job_keywords.into_iter().map(Into::into).collect();

    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) =
        job.iter().cloned().partition(|kw| resume.contains(kw));

    let match_score = if job.is_empty() {
        if resume.is_empty() {
            100
        } else {
            0
        }
    } else {
        percent_round_half_up(matched_keywords.len(), job.len())
    };

    ComparisonResult {
        match_score,
        matched_keywords,
        missing_keywords,
    }
}

/// round(part / whole × 100) with halves rounded up, in exact integer arithmetic.
/// Requires `part <= whole` and `whole > 0`.
fn percent_round_half_up(part: usize, whole: usize) -> u8 {
    let scaled = (200 * part + whole) / (2 * whole);
    scaled.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_both_empty_scores_100() {
        let result = compare_keywords(KeywordSet::new(), KeywordSet::new());
        assert_eq!(result.match_score, 100);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_empty_resume_scores_zero_and_lists_all_missing() {
        let result = compare_keywords(KeywordSet::new(), set(&["python", "aws"]));
        assert_eq!(result.match_score, 0);
        assert!(result.matched_keywords.is_empty());
        assert_eq!(result.missing_keywords, vec!["aws", "python"]);
    }

    #[test]
    fn test_empty_job_with_nonempty_resume_scores_zero() {
        let result = compare_keywords(set(&["rust", "tokio"]), KeywordSet::new());
        assert_eq!(result.match_score, 0);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let result = compare_keywords(
            set(&["python", "aws", "docker"]),
            set(&["python", "aws", "kubernetes"]),
        );
        assert_eq!(result.match_score, 67);
        assert_eq!(result.matched_keywords, vec!["aws", "python"]);
        assert_eq!(result.missing_keywords, vec!["kubernetes"]);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // 1/8 = 12.5%
        let job: Vec<String> = (0..8).map(|i| format!("kw{i}")).collect();
        let result = compare_keywords(vec!["kw0".to_string()], job);
        assert_eq!(result.match_score, 13);

        // 1/2 = 50% exactly, 1/3 = 33.3%
        assert_eq!(compare_keywords(vec!["a"], vec!["a", "b"]).match_score, 50);
        assert_eq!(compare_keywords(vec!["a"], vec!["a", "b", "c"]).match_score, 33);
    }

    #[test]
    fn test_full_match_scores_100() {
        let result = compare_keywords(set(&["go", "sql", "extra"]), set(&["go", "sql"]));
        assert_eq!(result.match_score, 100);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_duplicate_raw_job_list_after_normalization() {
        let job = normalize_keywords(vec!["java", "java", "JAVA"]);
        let result = compare_keywords(set(&["java"]), job);
        assert_eq!(result.match_score, 100);
        assert_eq!(result.matched_keywords, vec!["java"]);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_duplicates_in_raw_sequence_match_deduplicated_set() {
        let raw = compare_keywords(
            vec!["rust", "rust", "sql"],
            vec!["rust", "go", "go", "go", "sql", "sql"],
        );
        let dedup = compare_keywords(set(&["rust", "sql"]), set(&["rust", "go", "sql"]));
        assert_eq!(raw, dedup);
        assert_eq!(raw.match_score, 67);
    }

    #[test]
    fn test_comparator_does_not_normalize_case() {
        let result = compare_keywords(vec!["Rust"], vec!["rust"]);
        assert_eq!(result.match_score, 0);
        assert_eq!(result.missing_keywords, vec!["rust"]);
    }

    #[test]
    fn test_order_independence() {
        let a = compare_keywords(
            vec!["docker", "aws", "python"],
            vec!["kubernetes", "python", "aws"],
        );
        let b = compare_keywords(
            vec!["python", "docker", "aws"],
            vec!["aws", "kubernetes", "python"],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let resume = set(&["a", "b", "c"]);
        let job = set(&["b", "c", "d", "e"]);
        let first = compare_keywords(resume.clone(), job.clone());
        let second = compare_keywords(resume, job);
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_covers_job_set_exactly() {
        let resume = set(&["a", "c", "x", "z"]);
        let job = set(&["a", "b", "c", "d"]);
        let result = compare_keywords(resume, job.clone());

        let matched: KeywordSet = result.matched_keywords.iter().cloned().collect();
        let missing: KeywordSet = result.missing_keywords.iter().cloned().collect();
        assert!(matched.is_disjoint(&missing));
        let union: KeywordSet = matched.union(&missing).cloned().collect();
        assert_eq!(union, job);
    }

    #[test]
    fn test_score_monotonic_in_intersection() {
        let job = set(&["a", "b", "c", "d", "e", "f", "g"]);
        let mut resume = KeywordSet::new();
        let mut last = compare_keywords(resume.clone(), job.clone()).match_score;
        for kw in &job {
            resume.insert(kw.clone());
            let score = compare_keywords(resume.clone(), job.clone()).match_score;
            assert!(score >= last, "score dropped from {last} to {score}");
            last = score;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_output_is_sorted() {
        let result = compare_keywords(
            vec!["zeta", "alpha"],
            vec!["zeta", "mu", "alpha", "beta"],
        );
        assert_eq!(result.matched_keywords, vec!["alpha", "zeta"]);
        assert_eq!(result.missing_keywords, vec!["beta", "mu"]);
    }

    #[test]
    fn test_normalize_trims_lowercases_and_drops_empty() {
        let normalized = normalize_keywords(["  AWS ", "", "   ", "Aws", "Machine Learning"]);
        assert_eq!(normalized, set(&["aws", "machine learning"]));
    }

    #[test]
    fn test_serializes_to_response_shape() {
        let result = compare_keywords(vec!["aws"], vec!["aws", "gcp"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["match_score"], 50);
        assert_eq!(json["matched_keywords"], serde_json::json!(["aws"]));
        assert_eq!(json["missing_keywords"], serde_json::json!(["gcp"]));
    }
}
