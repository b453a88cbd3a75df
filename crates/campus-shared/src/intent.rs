//! Intent model: topics, intents, conversation types and the analysis record.

use crate::entities::Entities;
use serde::{Deserialize, Serialize};

/// Structured campus topics that can be answered from backend data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Schedules,
    Menus,
    Buses,
    Events,
    Updates,
    Faqs,
}

impl Topic {
    /// All topics in declaration order (tie-break order for scoring)
    pub const ALL: [Topic; 6] = [
        Topic::Schedules,
        Topic::Menus,
        Topic::Buses,
        Topic::Events,
        Topic::Updates,
        Topic::Faqs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Menus => "menus",
            Self::Buses => "buses",
            Self::Events => "events",
            Self::Updates => "updates",
            Self::Faqs => "faqs",
        }
    }

    /// Human label used in nudges ("you might also be interested in ...")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Schedules => "class schedules",
            Self::Menus => "dining menus",
            Self::Buses => "bus times",
            Self::Events => "campus events",
            Self::Updates => "campus updates",
            Self::Faqs => "frequently asked questions",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Governing intent of one utterance. Exactly one per utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Schedules,
    Menus,
    Buses,
    Events,
    Updates,
    Faqs,
    /// Weather wording: answered conversationally, never with backend data
    Weather,
    /// Open question outside the structured domain
    GeneralKnowledge,
    /// Small talk
    Conversation,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Menus => "menus",
            Self::Buses => "buses",
            Self::Events => "events",
            Self::Updates => "updates",
            Self::Faqs => "faqs",
            Self::Weather => "weather",
            Self::GeneralKnowledge => "general_knowledge",
            Self::Conversation => "conversation",
        }
    }

    /// The structured topic behind this intent, if any
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Self::Schedules => Some(Topic::Schedules),
            Self::Menus => Some(Topic::Menus),
            Self::Buses => Some(Topic::Buses),
            Self::Events => Some(Topic::Events),
            Self::Updates => Some(Topic::Updates),
            Self::Faqs => Some(Topic::Faqs),
            Self::Weather | Self::GeneralKnowledge | Self::Conversation => None,
        }
    }
}

impl From<Topic> for Intent {
    fn from(topic: Topic) -> Self {
        match topic {
            Topic::Schedules => Intent::Schedules,
            Topic::Menus => Intent::Menus,
            Topic::Buses => Intent::Buses,
            Topic::Events => Intent::Events,
            Topic::Updates => Intent::Updates,
            Topic::Faqs => Intent::Faqs,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conversational register of an utterance, tagged independently of topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationType {
    Greeting,
    Farewell,
    Gratitude,
    Joke,
    Motivation,
    StudyTips,
    StressRelief,
    CasualInquiry,
    Identity,
    Help,
    General,
}

impl ConversationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::Gratitude => "gratitude",
            Self::Joke => "joke",
            Self::Motivation => "motivation",
            Self::StudyTips => "study_tips",
            Self::StressRelief => "stress_relief",
            Self::CasualInquiry => "casual_inquiry",
            Self::Identity => "identity",
            Self::Help => "help",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for ConversationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scored topic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: Topic,
    pub score: f32,
    /// min(score / 4, 1.0)
    pub confidence: f32,
}

impl TopicScore {
    pub fn new(topic: Topic, score: f32) -> Self {
        Self {
            topic,
            score,
            confidence: score_confidence(score),
        }
    }
}

/// Map a raw topic score onto [0, 1]
pub fn score_confidence(score: f32) -> f32 {
    (score / 4.0).clamp(0.0, 1.0)
}

/// Classifier output for one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentAnalysis {
    pub intent: Intent,
    pub confidence: f32,
    pub entities: Entities,
    /// Topics with a positive score, highest first
    pub detected_topics: Vec<TopicScore>,
    pub is_campus_info_request: bool,
    pub conversation_type: ConversationType,
}

impl IntentAnalysis {
    /// Best-scoring topic that is not the governing intent's topic and
    /// stayed below the acceptance threshold.
    pub fn near_miss(&self, threshold: f32) -> Option<Topic> {
        let primary = self.intent.topic();
        self.detected_topics
            .iter()
            .filter(|t| Some(t.topic) != primary)
            .find(|t| t.score > 0.0 && t.score < threshold)
            .map(|t| t.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_confidence_bounds() {
        assert_eq!(score_confidence(0.0), 0.0);
        assert_eq!(score_confidence(2.0), 0.5);
        assert_eq!(score_confidence(9.0), 1.0);
        assert_eq!(score_confidence(-1.0), 0.0);
    }

    #[test]
    fn test_intent_topic_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Intent::from(topic).topic(), Some(topic));
        }
        assert_eq!(Intent::Weather.topic(), None);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Intent::GeneralKnowledge).unwrap();
        assert_eq!(json, "\"general_knowledge\"");
        let json = serde_json::to_string(&ConversationType::StudyTips).unwrap();
        assert_eq!(json, "\"study_tips\"");
    }

    #[test]
    fn test_near_miss_skips_primary_and_accepted() {
        let analysis = IntentAnalysis {
            intent: Intent::Menus,
            confidence: 0.9,
            entities: Entities::default(),
            detected_topics: vec![
                TopicScore::new(Topic::Menus, 3.9),
                TopicScore::new(Topic::Events, 2.5),
                TopicScore::new(Topic::Buses, 0.6),
            ],
            is_campus_info_request: true,
            conversation_type: ConversationType::General,
        };
        assert_eq!(analysis.near_miss(2.0), Some(Topic::Buses));
    }
}
