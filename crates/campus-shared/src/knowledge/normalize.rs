//! Query normalization for knowledge lookup.

/// Leading phrases stripped before lookup, longest first. Stripping repeats,
/// so "tell me" followed by "who is" reduces to the subject.
const LEADING_PHRASES: &[&str] = &[
    "can you tell me about",
    "could you tell me about",
    "what do you know about",
    "i want to know about",
    "do you know about",
    "can you tell me",
    "could you tell me",
    "can you explain",
    "could you explain",
    "tell me about",
    "who exactly is",
    "what exactly is",
    "do you know",
    "tell me",
    "who is",
    "who was",
    "who were",
    "who are",
    "what is",
    "what was",
    "what are",
    "what were",
    "what's",
    "who's",
    "where is",
    "where was",
    "explain",
    "describe",
    "define",
    "who",
    "what",
];

const LEADING_ARTICLES: &[&str] = &["the", "a", "an"];

/// Auxiliaries left dangling by "who X was" word order
const TRAILING_AUXILIARIES: &[&str] = &["is", "was", "are", "were"];

/// Lowercase, trim, fold curly quotes and drop surrounding punctuation
pub fn normalize_key(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace('\u{2019}', "'")
        .trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'' || c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words of a normalized string, inner punctuation dropped
pub fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Strip `word` from the front of `text` when followed by a word boundary
fn strip_word_prefix<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    (rest.is_empty() || rest.starts_with(' ')).then(|| rest.trim_start())
}

fn strip_leading(text: &str) -> String {
    let mut s = text;
    loop {
        let next = LEADING_PHRASES
            .iter()
            .chain(LEADING_ARTICLES)
            .find_map(|p| strip_word_prefix(s, p))
            .or_else(|| {
                TRAILING_AUXILIARIES.iter().find_map(|aux| {
                    s.strip_suffix(aux)
                        .and_then(|rest| rest.strip_suffix(' '))
                        .filter(|rest| !rest.trim().is_empty())
                })
            });
        match next {
            Some(rest) if rest.len() < s.len() => s = rest.trim(),
            _ => break,
        }
    }
    s.to_string()
}

fn strip_possessive(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.strip_suffix("'s").or_else(|| w.strip_suffix("s'")).unwrap_or(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_plural(text: &str) -> String {
    match text.strip_suffix('s') {
        Some(stem) if text.len() > 3 && !stem.ends_with('s') => stem.to_string(),
        _ => text.to_string(),
    }
}

/// Normalized variants of a query, most literal first, de-duplicated.
pub fn query_variants(query: &str) -> Vec<String> {
    let full = normalize_key(query);
    let stripped = strip_leading(&full);
    let no_possessive = strip_possessive(&stripped);
    let singular = strip_plural(&no_possessive);

    let mut variants: Vec<String> = Vec::new();
    for v in [full, stripped, no_possessive, singular] {
        if !v.is_empty() && !variants.contains(&v) {
            variants.push(v);
        }
    }
    variants
}

/// The subject of a query with question scaffolding removed
pub fn subject_of(query: &str) -> String {
    strip_possessive(&strip_leading(&normalize_key(query)))
}
