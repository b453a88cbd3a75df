//! Generic weighted scoring over ordered `{matcher, weight, tag}` tables.
//!
//! Topic detection and knowledge-bucket classification both run through
//! `ScoreTable`, so tuning a category means editing data rather than code.

use regex::Regex;

/// How a signal recognizes itself in text
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Whole word, compared against the lowercased tokens
    Word(&'static str),
    /// Substring of the lowercased text
    Phrase(&'static str),
    /// Regular expression over the lowercased text
    Pattern(Regex),
}

/// Text prepared once for matching
#[derive(Debug, Clone)]
pub struct Prepared {
    pub lower: String,
    pub tokens: Vec<String>,
}

impl Prepared {
    pub fn new(text: &str) -> Self {
        let lower = text.to_lowercase().replace('\u{2019}', "'");
        let tokens = tokenize(&lower);
        Self { lower, tokens }
    }
}

/// Split lowercased text into word tokens, keeping inner apostrophes
pub fn tokenize(lower: &str) -> Vec<String> {
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

impl Matcher {
    pub fn is_match(&self, text: &Prepared) -> bool {
        match self {
            Matcher::Word(word) => text.tokens.iter().any(|t| t == *word),
            Matcher::Phrase(phrase) => text.lower.contains(*phrase),
            Matcher::Pattern(re) => re.is_match(&text.lower),
        }
    }
}

/// One row of a scoring table
#[derive(Debug, Clone)]
pub struct Signal<T> {
    pub tag: T,
    pub matcher: Matcher,
    pub weight: f32,
}

/// Ordered table of weighted signals. Tag order is the tie-break order.
#[derive(Debug, Clone)]
pub struct ScoreTable<T> {
    order: Vec<T>,
    signals: Vec<Signal<T>>,
}

impl<T: Copy + PartialEq> ScoreTable<T> {
    pub fn new(order: Vec<T>) -> Self {
        Self {
            order,
            signals: Vec::new(),
        }
    }

    pub fn push(&mut self, tag: T, matcher: Matcher, weight: f32) {
        self.signals.push(Signal { tag, matcher, weight });
    }

    /// Add every word in `words` with the same weight
    pub fn words(&mut self, tag: T, words: &[&'static str], weight: f32) {
        for w in words {
            self.push(tag, Matcher::Word(*w), weight);
        }
    }

    /// Add every phrase in `phrases` with the same weight
    pub fn phrases(&mut self, tag: T, phrases: &[&'static str], weight: f32) {
        for p in phrases {
            self.push(tag, Matcher::Phrase(*p), weight);
        }
    }

    /// Add compiled patterns with the same weight
    pub fn patterns(&mut self, tag: T, patterns: &[Regex], weight: f32) {
        for re in patterns {
            self.push(tag, Matcher::Pattern(re.clone()), weight);
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Score every tag, in declaration order. Each signal counts once.
    pub fn score(&self, text: &Prepared) -> Vec<(T, f32)> {
        let mut scores: Vec<(T, f32)> = self.order.iter().map(|t| (*t, 0.0)).collect();
        for signal in &self.signals {
            if signal.matcher.is_match(text) {
                if let Some(slot) = scores.iter_mut().find(|(t, _)| *t == signal.tag) {
                    slot.1 += signal.weight;
                }
            }
        }
        scores
    }

    /// Highest-scoring tag with a positive score; ties favor declaration order
    pub fn best(&self, text: &Prepared) -> Option<(T, f32)> {
        let mut best: Option<(T, f32)> = None;
        for (tag, score) in self.score(text) {
            if score <= 0.0 {
                continue;
            }
            match best {
                Some((_, current)) if current >= score => {}
                _ => best = Some((tag, score)),
            }
        }
        best
    }
}
