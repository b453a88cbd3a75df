//! Entity extraction: typed fields pulled from raw text with per-intent
//! pattern tables. First match wins per field; unmatched fields are absent.

use crate::intent::Intent;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Extractable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityField {
    Timeframe,
    Subject,
    MealType,
    Destination,
}

impl EntityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeframe => "timeframe",
            Self::Subject => "subject",
            Self::MealType => "mealType",
            Self::Destination => "destination",
        }
    }
}

/// Extracted entities, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entities(BTreeMap<EntityField, String>);

impl Entities {
    pub fn get(&self, field: EntityField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: EntityField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn contains(&self, field: EntityField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityField, &String)> {
        self.0.iter()
    }
}

/// What a matching rule yields
enum Yield {
    Fixed(&'static str),
    /// Capture group 1, trimmed
    Capture,
}

struct EntityRule {
    field: EntityField,
    pattern: Regex,
    value: Yield,
}

fn rule(field: EntityField, pattern: &str, value: Yield) -> EntityRule {
    EntityRule {
        field,
        pattern: Regex::new(pattern).unwrap(),
        value,
    }
}

/// Captured words that are never a subject
const SUBJECT_STOPWORDS: &[&str] = &[
    "my", "the", "a", "an", "next", "first", "last", "any", "all", "what", "which", "our", "your",
    "this", "that", "morning", "afternoon", "evening", "today", "tomorrow",
];

static TIMEFRAME_RULES: LazyLock<Vec<EntityRule>> = LazyLock::new(|| {
    use EntityField::Timeframe;
    vec![
        rule(Timeframe, r"\btomorrow\b", Yield::Fixed("tomorrow")),
        rule(
            Timeframe,
            r"\b(?:today|tonight|this (?:morning|afternoon|evening))\b",
            Yield::Fixed("today"),
        ),
        rule(
            Timeframe,
            r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
            Yield::Capture,
        ),
    ]
});

static SUBJECT_RULES: LazyLock<Vec<EntityRule>> = LazyLock::new(|| {
    use EntityField::Subject;
    vec![
        rule(
            Subject,
            r"\b(computer science|mathematics|math|physics|chemistry|biology|english|history|economics|psychology|philosophy|statistics|engineering|art|music)\b",
            Yield::Capture,
        ),
        rule(Subject, r"\b([a-z]{2,4} ?\d{3})\b", Yield::Capture),
        rule(
            Subject,
            r"\b([a-z]+) (?:class|classes|course|courses|lecture|lectures|lab|labs)\b",
            Yield::Capture,
        ),
    ]
});

static MEAL_RULES: LazyLock<Vec<EntityRule>> = LazyLock::new(|| {
    use EntityField::MealType;
    vec![
        rule(MealType, r"\b(?:breakfast|brunch)\b", Yield::Fixed("breakfast")),
        rule(MealType, r"\blunch\b", Yield::Fixed("lunch")),
        rule(MealType, r"\b(?:dinner|supper)\b", Yield::Fixed("dinner")),
        rule(MealType, r"\bsnacks?\b", Yield::Fixed("snack")),
    ]
});

static DESTINATION_RULES: LazyLock<Vec<EntityRule>> = LazyLock::new(|| {
    use EntityField::Destination;
    vec![
        rule(
            Destination,
            r"\b(?:to|towards|for) (?:the )?(downtown|library|north campus|south campus|east campus|west campus|airport|train station|station|stadium|medical center|city center|mall|dorms|residence halls?)\b",
            Yield::Capture,
        ),
        // Last "to ..." in the sentence, minus a trailing timeframe
        rule(
            Destination,
            r"^.*\bto (?:the )?([a-z][a-z ]*?)\s*(?:\b(?:today|tonight|tomorrow|now|please)\b)?\s*[?.!]*$",
            Yield::Capture,
        ),
    ]
});

/// Rule tables consulted for an intent, one per field
fn tables_for(intent: Intent) -> Vec<&'static [EntityRule]> {
    match intent {
        Intent::Schedules => vec![TIMEFRAME_RULES.as_slice(), SUBJECT_RULES.as_slice()],
        Intent::Menus => vec![TIMEFRAME_RULES.as_slice(), MEAL_RULES.as_slice()],
        Intent::Buses => vec![TIMEFRAME_RULES.as_slice(), DESTINATION_RULES.as_slice()],
        Intent::Events => vec![TIMEFRAME_RULES.as_slice()],
        Intent::Updates
        | Intent::Faqs
        | Intent::Weather
        | Intent::GeneralKnowledge
        | Intent::Conversation => vec![],
    }
}

fn apply(rules: &[EntityRule], lower: &str) -> Option<(EntityField, String)> {
    for r in rules {
        let Some(caps) = r.pattern.captures(lower) else {
            continue;
        };
        let value = match r.value {
            Yield::Fixed(v) => v.to_string(),
            Yield::Capture => match caps.get(1) {
                Some(m) => m.as_str().trim().to_string(),
                None => continue,
            },
        };
        if value.is_empty() {
            continue;
        }
        if r.field == EntityField::Subject && SUBJECT_STOPWORDS.contains(&value.as_str()) {
            continue;
        }
        return Some((r.field, value));
    }
    None
}

/// Extract the fields relevant to `intent` from `text`
pub fn extract(text: &str, intent: Intent) -> Entities {
    let lower = text.to_lowercase().replace('\u{2019}', "'");
    let mut entities = Entities::default();
    for rules in tables_for(intent) {
        if let Some((field, value)) = apply(rules, &lower) {
            entities.insert(field, value);
        }
    }
    entities
}
