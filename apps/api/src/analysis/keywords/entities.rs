//! Named-entity style extraction: organizations, products and people that
//! statistical scoring tends to miss because they occur only once.

use std::collections::HashSet;

use regex::Regex;

use crate::analysis::comparator::KeywordSet;
use crate::analysis::keywords::{stopwords, EntityExtractor};

/// Lowercase words allowed inside an entity ("Bank of America", "AT & T").
const CONNECTORS: &[&str] = &["of", "&", "for", "de"];

/// Collects runs of capitalized tokens as entities.
///
/// A lone capitalized word at the start of a sentence is ignored unless it is
/// an acronym, since sentence case says nothing about it being a name.
pub struct ProperNounEntityExtractor {
    stopwords: HashSet<&'static str>,
    sentence_re: Regex,
}

impl ProperNounEntityExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            stopwords: stopwords::english(),
            sentence_re: Regex::new(r"[.!?;]+\s+|[.!?;]+$|[\r\n]+|[•·▪●◦]")?,
        })
    }

    fn is_name_token(&self, core: &str) -> bool {
        starts_uppercase(core) && !self.stopwords.contains(core.to_lowercase().as_str())
    }
}

impl EntityExtractor for ProperNounEntityExtractor {
    fn extract_entities(&self, text: &str) -> KeywordSet {
        let mut entities = KeywordSet::new();

        for sentence in self.sentence_re.split(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            let mut run: Vec<&str> = Vec::new();
            let mut run_start = 0;

            for (i, word) in words.iter().enumerate() {
                let core = word.trim_matches(|c: char| {
                    !c.is_alphanumeric() && !matches!(c, '+' | '#' | '&')
                });
                if core.is_empty() {
                    flush(&mut run, run_start, &mut entities);
                    continue;
                }

                let next_is_name = words
                    .get(i + 1)
                    .map(|w| self.is_name_token(w.trim_matches(|c: char| !c.is_alphanumeric())))
                    .unwrap_or(false);

                if self.is_name_token(core) {
                    if run.is_empty() {
                        run_start = i;
                    }
                    run.push(core);
                } else if !run.is_empty()
                    && next_is_name
                    && CONNECTORS.contains(&core.to_lowercase().as_str())
                {
                    run.push(core);
                } else {
                    flush(&mut run, run_start, &mut entities);
                }

                if word.ends_with([',', ':', ')', '(', '"']) {
                    flush(&mut run, run_start, &mut entities);
                }
            }
            flush(&mut run, run_start, &mut entities);
        }

        entities
    }

    fn name(&self) -> &str {
        "proper-noun"
    }
}

fn flush(run: &mut Vec<&str>, run_start: usize, entities: &mut KeywordSet) {
    while run
        .last()
        .map(|w| CONNECTORS.contains(&w.to_lowercase().as_str()))
        .unwrap_or(false)
    {
        run.pop();
    }
    let sentence_case_only = run_start == 0 && run.len() == 1 && !is_acronym(run[0]);
    if !run.is_empty() && !sentence_case_only {
        entities.insert(run.join(" ").to_lowercase());
    }
    run.clear();
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}
