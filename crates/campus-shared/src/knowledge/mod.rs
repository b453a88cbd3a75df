//! Knowledge base and contextual responder (v0.2.0).
//!
//! Stage 1: keyed lookup over normalized query variants. A key matches when
//! its words appear as a contiguous run inside the variant's words, or the
//! reverse; first match wins. Matching is on whole words, so "dna" never
//! hits "adnan".
//! Stage 2: no entry matched, so classify the question into a bucket and
//! answer with that bucket's template. Never a bare "I don't know", never
//! an invented fact.

pub mod buckets;
pub mod builtin;
pub mod normalize;

pub use buckets::KnowledgeBucket;

use crate::error::CampusError;
use normalize::{normalize_key, query_variants, subject_of, tokens};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Variants shorter than this never match by containment
const MIN_VARIANT_LEN: usize = 3;

/// Words that cannot carry a lookup on their own
const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "of", "and", "or", "in", "on", "is", "was", "are", "who", "what", "it",
];

/// `needle` appears as a contiguous run of words in `haystack`
fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

fn key_matches(key: &str, variant: &str) -> bool {
    let key = tokens(key);
    let variant = tokens(variant);
    if contains_run(&variant, &key) {
        return true;
    }
    variant.iter().any(|w| !FUNCTION_WORDS.contains(w)) && contains_run(&key, &variant)
}

/// One keyed answer. Keys are normalized (lowercase, trimmed) and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub key: String,
    pub answer: String,
}

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KnowledgeSource {
    /// Matched a knowledge-base entry
    Entry { key: String },
    /// Bucket template fallback
    Template { bucket: KnowledgeBucket },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeAnswer {
    pub answer: String,
    pub source: KnowledgeSource,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge base seeded with the built-in entries
    pub fn builtin() -> Self {
        let mut kb = Self::new();
        for (key, answer) in builtin::ENTRIES {
            // Built-in keys are never empty
            let _ = kb.insert(key, answer);
        }
        kb
    }

    /// Insert or replace an entry; the key is normalized first
    pub fn insert(&mut self, key: &str, answer: &str) -> Result<(), CampusError> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(CampusError::EmptyKnowledgeKey);
        }
        let entry = KnowledgeEntry {
            key,
            answer: answer.trim().to_string(),
        };
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// Merge entries from a JSON file of `[{"key": .., "answer": ..}]`
    pub fn load_json_file(&mut self, path: &Path) -> Result<usize, CampusError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(&content)?;
        let count = entries.len();
        for e in entries {
            self.insert(&e.key, &e.answer)?;
        }
        info!("Loaded {} knowledge entries from {}", count, path.display());
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Stage 1 only: whole-word lookup
    pub fn lookup(&self, query: &str) -> Option<&KnowledgeEntry> {
        for variant in query_variants(query) {
            if variant.len() < MIN_VARIANT_LEN {
                continue;
            }
            let hit = self
                .entries
                .iter()
                .find(|e| key_matches(&e.key, &variant));
            if let Some(entry) = hit {
                debug!(key = %entry.key, variant = %variant, "knowledge hit");
                return Some(entry);
            }
        }
        None
    }

    /// Both stages: entry answer or bucket template
    pub fn answer(&self, query: &str) -> KnowledgeAnswer {
        if let Some(entry) = self.lookup(query) {
            return KnowledgeAnswer {
                answer: entry.answer.clone(),
                source: KnowledgeSource::Entry {
                    key: entry.key.clone(),
                },
            };
        }
        let bucket = buckets::classify_bucket(query);
        debug!(%bucket, "knowledge miss, using template");
        KnowledgeAnswer {
            answer: buckets::template(bucket, &subject_of(query)),
            source: KnowledgeSource::Template { bucket },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_prefix_tolerant() {
        let kb = KnowledgeBase::builtin();
        let a = kb.lookup("Who is Einstein?").unwrap();
        let b = kb.lookup("einstein").unwrap();
        assert_eq!(a, b);
        assert_eq!(kb.answer("Who is Einstein?"), kb.answer("einstein"));
    }

    #[test]
    fn test_lookup_strips_possessive_and_plural() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.lookup("What are Newton's laws?").is_some());
        assert!(kb.lookup("tell me about black holes").is_some());
    }

    #[test]
    fn test_short_key_does_not_match_inside_words() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.lookup("Who is Adnan?").is_none());
        let ans = kb.answer("Who is Adnan?");
        assert_eq!(
            ans.source,
            KnowledgeSource::Template {
                bucket: KnowledgeBucket::Person
            }
        );
        assert!(!ans.answer.contains("deoxyribonucleic"));
        assert!(kb.lookup("explain the internet").is_some());
        assert_eq!(kb.lookup("what is dna?").unwrap().key, "dna");
    }

    #[test]
    fn test_chained_prefixes_find_the_same_entry() {
        let kb = KnowledgeBase::builtin();
        let expected = kb.answer("einstein");
        for q in [
            "tell me who is Einstein",
            "do you know who Einstein was?",
            "Can you explain who Einstein is?",
        ] {
            assert_eq!(kb.answer(q), expected, "{q}");
        }
    }

    #[test]
    fn test_partial_name_matches_whole_words() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.lookup("who was newton").unwrap().key, "isaac newton");
        assert!(kb.lookup("what is the").is_none());
    }

    #[test]
    fn test_insert_normalizes_and_replaces() {
        let mut kb = KnowledgeBase::new();
        kb.insert("  Rust Language ", "A systems language.").unwrap();
        kb.insert("rust language", "Memory safe systems language.").unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.entries()[0].key, "rust language");
        assert_eq!(kb.entries()[0].answer, "Memory safe systems language.");
        assert!(matches!(kb.insert("  ?  ", "x"), Err(CampusError::EmptyKnowledgeKey)));
    }

    #[test]
    fn test_short_variants_do_not_match_everything() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.lookup("a").is_none());
        assert!(kb.lookup("is").is_none());
    }

    #[test]
    fn test_miss_falls_back_to_bucket_template() {
        let kb = KnowledgeBase::builtin();
        let ans = kb.answer("Who is Zorblax Quimby?");
        assert_eq!(
            ans.source,
            KnowledgeSource::Template {
                bucket: KnowledgeBucket::Person
            }
        );
        assert!(ans.answer.contains("zorblax quimby"));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.json");
        std::fs::write(
            &path,
            r#"[{"key": "Campus Mascot", "answer": "The mascot is a heron."}]"#,
        )
        .unwrap();
        let mut kb = KnowledgeBase::new();
        assert_eq!(kb.load_json_file(&path).unwrap(), 1);
        assert_eq!(kb.answer("what is the campus mascot?").answer, "The mascot is a heron.");
    }
}
