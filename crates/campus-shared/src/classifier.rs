//! Intent classifier.
//!
//! Cascade, in order:
//! 1. Priority overrides: high-precision patterns that must never be diluted
//!    by keyword overlap (weather, explicit FAQ wording).
//! 2. Weighted topic scoring over the six structured topics:
//!    keyword hit = 1 x weight, phrase hit = 2 x weight, context hit = 0.5 x weight.
//! 3. Acceptance threshold on the best topic.
//! 4. Conversation-type tagging (independent, first match wins).
//! 5. General-knowledge heuristic when no topic is accepted.
//!
//! `classify` is total: every input yields a well-formed analysis.

use crate::entities;
use crate::error::CampusError;
use crate::intent::{score_confidence, ConversationType, Intent, IntentAnalysis, Topic, TopicScore};
use crate::scoring::{Prepared, ScoreTable};
use crate::tuning::ClassifierTuning;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Confidence for a recognized conversational turn
pub const CONVERSATION_CONFIDENCE: f32 = 0.9;
/// Confidence for a general-knowledge question
pub const KNOWLEDGE_CONFIDENCE: f32 = 0.7;
/// Confidence for unrecognized small talk
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

struct PriorityOverride {
    pattern: Regex,
    intent: Intent,
    campus_info: bool,
}

static PRIORITY_OVERRIDES: LazyLock<Vec<PriorityOverride>> = LazyLock::new(|| {
    vec![
        PriorityOverride {
            pattern: Regex::new(
                r"\b(weather|forecast|temperature|rain|raining|rainy|snow|snowing|sunny|umbrella|humidity)\b",
            )
            .unwrap(),
            intent: Intent::Weather,
            campus_info: false,
        },
        PriorityOverride {
            pattern: Regex::new(r"\b(faqs?|frequently asked)\b").unwrap(),
            intent: Intent::Faqs,
            campus_info: true,
        },
    ]
});

static CONVERSATION_PATTERNS: LazyLock<Vec<(Regex, ConversationType)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"^\s*(hi|hello|hey|heya|hiya|howdy|greetings|yo|good (morning|afternoon|evening))\b")
                .unwrap(),
            ConversationType::Greeting,
        ),
        (
            Regex::new(r"\b(bye|goodbye|good bye|see (you|ya)|good night|take care|farewell|catch you later)\b")
                .unwrap(),
            ConversationType::Farewell,
        ),
        (
            Regex::new(r"\b(thanks|thank you|thx|ty|appreciate it|much appreciated|cheers)\b").unwrap(),
            ConversationType::Gratitude,
        ),
        (
            Regex::new(r"\b(jokes?|make me laugh|something funny|funny)\b").unwrap(),
            ConversationType::Joke,
        ),
        (
            Regex::new(r"\b(motivat\w*|inspire|inspiration|encourag\w*|give up|giving up|unmotivated)\b")
                .unwrap(),
            ConversationType::Motivation,
        ),
        (
            Regex::new(
                r"\b(study tips?|how (should|do|can) i study|studying|focus|concentrate|exam prep|prepare for (my )?(exams?|tests?|finals?))\b",
            )
            .unwrap(),
            ConversationType::StudyTips,
        ),
        (
            Regex::new(r"\b(stress|stressed|anxious|anxiety|overwhelmed|burn ?out|burnt out|burned out|worried|nervous|panic)\b")
                .unwrap(),
            ConversationType::StressRelief,
        ),
        (
            Regex::new(r"\b(how are you|how's it going|how are things|what's up|wassup|how do you do|how have you been)\b")
                .unwrap(),
            ConversationType::CasualInquiry,
        ),
        (
            Regex::new(r"\b(who are you|what are you|your name|are you (a )?(bot|robot|human|real|ai))\b")
                .unwrap(),
            ConversationType::Identity,
        ),
        (
            Regex::new(r"\b(help|what can you do|what do you do|how does this work|capabilities)\b").unwrap(),
            ConversationType::Help,
        ),
    ]
});

static INTERROGATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(who|what|when|where|why|how|which|whom|whose)\b").unwrap());

static KNOWLEDGE_CUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(who (is|was|were)|what (is|are|was|were)|what's|tell me about|do you know (who|what|about)|tell me who|explain|define|definition of|history of|meaning of|how does|why (is|are|do|does|did))\b",
    )
    .unwrap()
});

/// Domain vocabulary hinting at a knowledge question (science, history,
/// technology, academia)
const KNOWLEDGE_DOMAIN_WORDS: &[&str] = &[
    // science
    "physics", "chemistry", "biology", "atom", "atoms", "molecule", "gravity", "energy", "planet",
    "planets", "universe", "evolution", "cell", "cells", "dna", "photosynthesis", "theory",
    "scientist", "element", "species",
    // history
    "history", "war", "empire", "revolution", "century", "ancient", "civilization", "president",
    "king", "queen", "invented", "discovered", "founded",
    // technology
    "computer", "computers", "internet", "software", "programming", "algorithm", "ai",
    "artificial", "intelligence", "robot", "technology", "blockchain", "quantum",
    // academia
    "philosophy", "mathematics", "literature", "economics", "psychology", "author", "novel",
    "poem", "equation", "concept",
];

/// Intent classifier with a topic table built from tuning weights
pub struct IntentClassifier {
    tuning: ClassifierTuning,
    topics: ScoreTable<Topic>,
}

struct TopicVocabulary {
    topic: Topic,
    keywords: &'static [&'static str],
    phrases: &'static [&'static str],
    context: &'static [&'static str],
}

const TOPIC_VOCABULARY: &[TopicVocabulary] = &[
    TopicVocabulary {
        topic: Topic::Schedules,
        keywords: &[
            "schedule", "schedules", "class", "classes", "course", "courses", "lecture", "lectures",
            "timetable", "lab", "labs", "seminar", "professor", "exam", "exams", "midterm",
            "tutorial", "section",
        ],
        phrases: &[
            "my classes", "class schedule", "when is my", "what time is my", "next class",
            "office hours",
        ],
        context: &[
            "today", "tomorrow", "week", "monday", "tuesday", "wednesday", "thursday", "friday",
            "time", "room", "when",
        ],
    },
    TopicVocabulary {
        topic: Topic::Menus,
        keywords: &[
            "menu", "menus", "food", "eat", "eating", "breakfast", "brunch", "lunch", "dinner",
            "supper", "meal", "meals", "dining", "cafeteria", "cafe", "snack", "snacks", "vegan",
            "vegetarian",
        ],
        phrases: &[
            "hungry", "what's for lunch", "what's for dinner", "what's for breakfast", "dining hall",
            "on the menu", "something to eat", "grab a bite",
        ],
        context: &["today", "tonight", "price", "cheap", "serving", "open"],
    },
    TopicVocabulary {
        topic: Topic::Buses,
        keywords: &[
            "bus", "buses", "shuttle", "shuttles", "transit", "transport", "transportation",
            "route", "routes", "ride", "stop",
        ],
        phrases: &["next bus", "bus to", "shuttle to", "bus schedule", "get to", "how do i get"],
        context: &[
            "downtown", "station", "airport", "depart", "departure", "leave", "arrive", "when",
        ],
    },
    TopicVocabulary {
        topic: Topic::Events,
        keywords: &[
            "event", "events", "happening", "concert", "party", "festival", "club", "clubs",
            "activity", "activities", "workshop", "game", "fair", "meetup",
        ],
        phrases: &["what's happening", "things to do", "this weekend", "going on", "anything fun"],
        context: &["tonight", "weekend", "today", "fun", "free"],
    },
    TopicVocabulary {
        topic: Topic::Updates,
        keywords: &[
            "update", "updates", "news", "announcement", "announcements", "notice", "notices",
            "alert", "alerts", "closure", "closed", "cancelled", "canceled",
        ],
        phrases: &["campus news", "what's new", "latest news", "any updates", "any announcements"],
        context: &["latest", "recent", "new", "today"],
    },
    TopicVocabulary {
        topic: Topic::Faqs,
        keywords: &[
            "register", "registration", "enroll", "enrollment", "tuition", "deadline", "deadlines",
            "policy", "policies", "parking", "wifi", "library", "transcript", "housing",
        ],
        phrases: &[
            "how do i", "how can i", "where can i", "financial aid", "student id", "drop a class",
            "reset my password",
        ],
        context: &["help", "question", "questions", "info", "information"],
    },
];

fn build_topic_table(tuning: &ClassifierTuning) -> ScoreTable<Topic> {
    let mut table = ScoreTable::new(Topic::ALL.to_vec());
    for vocab in TOPIC_VOCABULARY {
        let w = tuning.topic_weights.get(vocab.topic);
        table.words(vocab.topic, vocab.keywords, w);
        table.phrases(vocab.topic, vocab.phrases, 2.0 * w);
        table.words(vocab.topic, vocab.context, 0.5 * w);
    }
    table
}

impl Default for IntentClassifier {
    fn default() -> Self {
        let tuning = ClassifierTuning::default();
        let topics = build_topic_table(&tuning);
        Self { tuning, topics }
    }
}

impl IntentClassifier {
    pub fn new(tuning: ClassifierTuning) -> Result<Self, CampusError> {
        tuning.validate()?;
        let topics = build_topic_table(&tuning);
        Ok(Self { tuning, topics })
    }

    pub fn tuning(&self) -> &ClassifierTuning {
        &self.tuning
    }

    /// Score every structured topic; positive scores only, highest first
    pub fn score_topics(&self, text: &str) -> Vec<TopicScore> {
        let prepared = Prepared::new(text);
        let mut scores: Vec<TopicScore> = self
            .topics
            .score(&prepared)
            .into_iter()
            .filter(|(_, s)| *s > 0.0)
            .map(|(t, s)| TopicScore::new(t, s))
            .collect();
        // Stable sort keeps declaration order on ties
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }

    /// Classify one utterance
    pub fn classify(&self, text: &str) -> IntentAnalysis {
        let prepared = Prepared::new(text);
        let conversation_type = conversation_type(&prepared.lower);

        if let Some(hit) = PRIORITY_OVERRIDES.iter().find(|o| o.pattern.is_match(&prepared.lower)) {
            debug!(intent = %hit.intent, "priority override");
            return IntentAnalysis {
                intent: hit.intent,
                confidence: self.tuning.priority_confidence,
                entities: entities::extract(text, hit.intent),
                detected_topics: Vec::new(),
                is_campus_info_request: hit.campus_info,
                conversation_type,
            };
        }

        let detected_topics = self.score_topics(text);
        let threshold = self.tuning.acceptance_threshold;

        if let Some(best) = detected_topics.first().filter(|t| t.score >= threshold) {
            let intent = Intent::from(best.topic);
            debug!(%intent, score = best.score, "topic accepted");
            return IntentAnalysis {
                intent,
                confidence: score_confidence(best.score),
                entities: entities::extract(text, intent),
                detected_topics,
                is_campus_info_request: true,
                conversation_type,
            };
        }

        let (intent, confidence) = if conversation_type != ConversationType::General {
            (Intent::Conversation, CONVERSATION_CONFIDENCE)
        } else if is_knowledge_question(&prepared) {
            (Intent::GeneralKnowledge, KNOWLEDGE_CONFIDENCE)
        } else {
            (Intent::Conversation, FALLBACK_CONFIDENCE)
        };

        IntentAnalysis {
            intent,
            confidence,
            entities: Default::default(),
            detected_topics,
            is_campus_info_request: false,
            conversation_type,
        }
    }
}

/// First matching conversation pattern, else `general`
pub fn conversation_type(lower: &str) -> ConversationType {
    CONVERSATION_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(lower))
        .map(|(_, t)| *t)
        .unwrap_or(ConversationType::General)
}

/// Heuristic: explicit knowledge cue, or a question touching a knowledge domain
fn is_knowledge_question(text: &Prepared) -> bool {
    if KNOWLEDGE_CUES.is_match(&text.lower) {
        return true;
    }
    let asks = INTERROGATIVE.is_match(&text.lower) || text.lower.trim_end().ends_with('?');
    asks && text.tokens.iter().any(|t| KNOWLEDGE_DOMAIN_WORDS.contains(&t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntityField;

    fn classify(text: &str) -> IntentAnalysis {
        IntentClassifier::default().classify(text)
    }

    #[test]
    fn test_weather_override_beats_topics() {
        let a = classify("what is the weather today");
        assert_eq!(a.intent, Intent::Weather);
        assert!(!a.is_campus_info_request);
        assert_eq!(a.confidence, 0.95);

        let a = classify("will it rain during the bus ride to downtown for lunch?");
        assert_eq!(a.intent, Intent::Weather);
        assert!(a.detected_topics.is_empty());
    }

    #[test]
    fn test_faq_override() {
        let a = classify("show me frequently asked questions");
        assert_eq!(a.intent, Intent::Faqs);
        assert!(a.is_campus_info_request);
        assert_eq!(a.confidence, 0.95);
    }

    #[test]
    fn test_hungry_routes_to_menus() {
        let a = classify("I'm hungry");
        assert_eq!(a.intent, Intent::Menus);
        assert!(a.is_campus_info_request);
        assert!((a.confidence - 0.65).abs() < 1e-5);
    }

    #[test]
    fn test_lunch_query_extracts_entities() {
        let a = classify("What's for lunch today?");
        assert_eq!(a.intent, Intent::Menus);
        assert_eq!(a.entities.get(EntityField::MealType), Some("lunch"));
        assert_eq!(a.entities.get(EntityField::Timeframe), Some("today"));
        assert_eq!(a.confidence, 1.0);
    }

    #[test]
    fn test_greeting() {
        let a = classify("Hello!");
        assert_eq!(a.intent, Intent::Conversation);
        assert_eq!(a.conversation_type, ConversationType::Greeting);
        assert!(!a.is_campus_info_request);
        assert!(a.detected_topics.is_empty());
    }

    #[test]
    fn test_conversation_type_per_utterance() {
        let cases = [
            ("Hello!", ConversationType::Greeting),
            ("goodbye for now", ConversationType::Farewell),
            ("thanks a lot", ConversationType::Gratitude),
            ("tell me a joke", ConversationType::Joke),
            ("I need some motivation", ConversationType::Motivation),
            ("any study tips for finals?", ConversationType::StudyTips),
            ("I'm so stressed about exams", ConversationType::StressRelief),
            ("how are you doing?", ConversationType::CasualInquiry),
            ("who are you?", ConversationType::Identity),
            ("what can you do?", ConversationType::Help),
            ("the quad looks nice", ConversationType::General),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text).conversation_type, expected, "{text}");
        }
    }

    #[test]
    fn test_conversation_table_first_match_wins() {
        // Declaration order: greeting, farewell, gratitude, joke, ...
        assert_eq!(conversation_type("thanks, bye"), ConversationType::Farewell);
        assert_eq!(conversation_type("hey, thanks"), ConversationType::Greeting);
        assert_eq!(conversation_type("i'm stressed, tell me a joke"), ConversationType::Joke);
        assert_eq!(conversation_type("how are you? can you help"), ConversationType::CasualInquiry);
    }

    #[test]
    fn test_general_knowledge() {
        let a = classify("Who is Einstein?");
        assert_eq!(a.intent, Intent::GeneralKnowledge);
        assert!(!a.is_campus_info_request);

        let a = classify("when did the roman empire fall?");
        assert_eq!(a.intent, Intent::GeneralKnowledge);

        let a = classify("do you know who Einstein was?");
        assert_eq!(a.intent, Intent::GeneralKnowledge);
    }

    #[test]
    fn test_conversation_patterns_win_over_knowledge() {
        let a = classify("what is your name?");
        assert_eq!(a.intent, Intent::Conversation);
        assert_eq!(a.conversation_type, ConversationType::Identity);
    }

    #[test]
    fn test_below_threshold_kept_as_detected_topic() {
        let a = classify("tell me something about the library");
        assert!(!a.is_campus_info_request);
        assert_eq!(a.detected_topics[0].topic, Topic::Faqs);
        assert!(a.detected_topics[0].score < 2.0);
    }

    #[test]
    fn test_faq_scored_without_override() {
        let a = classify("How do I register for classes?");
        assert_eq!(a.intent, Intent::Faqs);
        assert!(a.is_campus_info_request);
    }

    #[test]
    fn test_threshold_is_tunable() {
        let mut tuning = ClassifierTuning::default();
        tuning.acceptance_threshold = 10.0;
        let c = IntentClassifier::new(tuning).unwrap();
        let a = c.classify("I'm hungry");
        assert_eq!(a.intent, Intent::Conversation);
        assert_eq!(a.detected_topics[0].topic, Topic::Menus);
    }

    #[test]
    fn test_confidence_always_in_range() {
        let inputs = [
            "",
            "   ",
            "!!!",
            "bus bus shuttle transit route routes ride stop next bus bus to shuttle to downtown",
            "lunch dinner breakfast menu food eat hungry dining hall what's for lunch",
            "asdkjh qwe",
        ];
        for input in inputs {
            let a = classify(input);
            assert!((0.0..=1.0).contains(&a.confidence), "{input}: {}", a.confidence);
            for t in &a.detected_topics {
                assert!((0.0..=1.0).contains(&t.confidence));
            }
        }
    }
}
