//! Coarse question buckets for templated answers when no entry matches.
//!
//! Same weighted-table technique as topic scoring: patterns score 3,
//! keyword indicators score 1. Highest bucket wins, ties go to declaration
//! order, and no signal at all means `general`.

use crate::scoring::{Prepared, ScoreTable};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const PATTERN_SCORE: f32 = 3.0;
pub const KEYWORD_SCORE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeBucket {
    Person,
    Place,
    Concept,
    Historical,
    Scientific,
    Technological,
    General,
}

impl KnowledgeBucket {
    pub const ALL: [KnowledgeBucket; 7] = [
        KnowledgeBucket::Person,
        KnowledgeBucket::Place,
        KnowledgeBucket::Concept,
        KnowledgeBucket::Historical,
        KnowledgeBucket::Scientific,
        KnowledgeBucket::Technological,
        KnowledgeBucket::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Place => "place",
            Self::Concept => "concept",
            Self::Historical => "historical",
            Self::Scientific => "scientific",
            Self::Technological => "technological",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for KnowledgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn patterns(list: &[&str]) -> Vec<Regex> {
    list.iter().map(|p| Regex::new(p).unwrap()).collect()
}

static BUCKET_TABLE: LazyLock<ScoreTable<KnowledgeBucket>> = LazyLock::new(|| {
    use KnowledgeBucket::*;
    let mut t = ScoreTable::new(KnowledgeBucket::ALL.to_vec());

    t.patterns(
        Person,
        &patterns(&[r"^\s*who\b", r"\bwho (is|was|were|invented|discovered|wrote)\b", r"\b(biography|life of)\b"]),
        PATTERN_SCORE,
    );
    t.words(
        Person,
        &["scientist", "author", "writer", "artist", "president", "king", "queen", "inventor", "philosopher", "born", "famous"],
        KEYWORD_SCORE,
    );

    t.patterns(
        Place,
        &patterns(&[r"^\s*where\b", r"\b(capital of|located in|where is|how far is)\b"]),
        PATTERN_SCORE,
    );
    t.words(
        Place,
        &["city", "country", "continent", "mountain", "river", "ocean", "island", "capital", "located", "map"],
        KEYWORD_SCORE,
    );

    t.patterns(
        Concept,
        &patterns(&[r"\b(meaning of|definition of|define|concept of|what does .+ mean)\b"]),
        PATTERN_SCORE,
    );
    t.words(
        Concept,
        &["meaning", "definition", "concept", "idea", "theory", "principle", "philosophy", "term"],
        KEYWORD_SCORE,
    );

    t.patterns(
        Historical,
        &patterns(&[r"^\s*when (did|was|were)\b", r"\b(history of|what happened|in the year|\d{3,4}s?\b)"]),
        PATTERN_SCORE,
    );
    t.words(
        Historical,
        &["war", "empire", "revolution", "ancient", "century", "dynasty", "medieval", "civilization", "history", "historical"],
        KEYWORD_SCORE,
    );

    t.patterns(
        Scientific,
        &patterns(&[r"\bhow does .+ (grow|form|evolve|react)\b", r"\bwhy (is|are|do|does) the (sky|sun|moon|ocean|earth)\b"]),
        PATTERN_SCORE,
    );
    t.words(
        Scientific,
        &["physics", "chemistry", "biology", "atom", "molecule", "gravity", "energy", "cell", "dna", "evolution", "planet", "universe", "photosynthesis", "experiment"],
        KEYWORD_SCORE,
    );

    t.patterns(
        Technological,
        &patterns(&[r"\bhow does .+ work\b", r"\bhow (do|does) (a |an |the )?(computer|phone|internet|program|app)\b"]),
        PATTERN_SCORE,
    );
    t.words(
        Technological,
        &["computer", "software", "internet", "programming", "algorithm", "ai", "robot", "technology", "app", "code", "network", "blockchain"],
        KEYWORD_SCORE,
    );

    t
});

/// Bucket for a query with no knowledge-base entry
pub fn classify_bucket(query: &str) -> KnowledgeBucket {
    BUCKET_TABLE
        .best(&Prepared::new(query))
        .map(|(bucket, _)| bucket)
        .unwrap_or(KnowledgeBucket::General)
}

/// Templated reply for a bucket: admits no verified answer, offers related
/// help and points back to campus information.
pub fn template(bucket: KnowledgeBucket, subject: &str) -> String {
    let subject = if subject.is_empty() { "that" } else { subject };
    match bucket {
        KnowledgeBucket::Person => format!(
            "I don't have verified biographical details about {subject} in my knowledge base. \
             A library database or an encyclopedia is the best place to learn about their life and work. \
             The campus library staff can help you find good sources, and I can tell you its opening hours or any campus events featuring speakers."
        ),
        KnowledgeBucket::Place => format!(
            "I don't have reliable information about {subject} right now. \
             A map service or travel guide will have accurate details on location and geography. \
             If you're trying to get somewhere nearby, I can check campus bus times for you."
        ),
        KnowledgeBucket::Concept => format!(
            "I don't have a verified explanation of {subject} on hand. \
             Course textbooks, lecture notes or your professor's office hours are great places to dig into concepts like this. \
             I can look up your campus class schedule if you want to catch the next lecture."
        ),
        KnowledgeBucket::Historical => format!(
            "I don't have verified historical records about {subject}. \
             The library's history collection and academic databases will give you trustworthy accounts. \
             I can also check whether any campus events or talks cover history topics."
        ),
        KnowledgeBucket::Scientific => format!(
            "I don't have a verified scientific answer about {subject} right now. \
             Peer-reviewed sources, your science textbooks or a lab instructor are the best references. \
             I can help you find your science class schedule or study-related campus events."
        ),
        KnowledgeBucket::Technological => format!(
            "I don't have verified technical details about {subject}. \
             Official documentation and computer science course material are the most reliable sources. \
             I can point you to campus updates or tech workshops if that helps."
        ),
        KnowledgeBucket::General => format!(
            "I don't have a specific answer about {subject} in my knowledge base. \
             I'm most useful for campus information: class schedules, dining menus, bus times, events, updates and FAQs. \
             Want me to look any of those up?"
        ),
    }
}
