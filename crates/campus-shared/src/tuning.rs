//! Classifier tuning constants.
//!
//! The acceptance threshold and per-topic weights have no documented
//! derivation, so they are configurable rather than baked in.

use crate::error::CampusError;
use crate::intent::Topic;
use serde::{Deserialize, Serialize};

/// Per-topic weight multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWeights {
    #[serde(default = "default_schedules_weight")]
    pub schedules: f32,
    #[serde(default = "default_menus_weight")]
    pub menus: f32,
    #[serde(default = "default_buses_weight")]
    pub buses: f32,
    #[serde(default = "default_events_weight")]
    pub events: f32,
    #[serde(default = "default_updates_weight")]
    pub updates: f32,
    #[serde(default = "default_faqs_weight")]
    pub faqs: f32,
}

fn default_schedules_weight() -> f32 {
    1.2
}

fn default_menus_weight() -> f32 {
    1.3
}

fn default_buses_weight() -> f32 {
    1.2
}

fn default_events_weight() -> f32 {
    1.0
}

fn default_updates_weight() -> f32 {
    0.9
}

// Lowest: FAQ vocabulary overlaps every other topic
fn default_faqs_weight() -> f32 {
    0.8
}

impl Default for TopicWeights {
    fn default() -> Self {
        Self {
            schedules: default_schedules_weight(),
            menus: default_menus_weight(),
            buses: default_buses_weight(),
            events: default_events_weight(),
            updates: default_updates_weight(),
            faqs: default_faqs_weight(),
        }
    }
}

impl TopicWeights {
    pub fn get(&self, topic: Topic) -> f32 {
        match topic {
            Topic::Schedules => self.schedules,
            Topic::Menus => self.menus,
            Topic::Buses => self.buses,
            Topic::Events => self.events,
            Topic::Updates => self.updates,
            Topic::Faqs => self.faqs,
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierTuning {
    /// Minimum topic score for a campus information request
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: f32,

    /// Confidence reported when a priority override fires
    #[serde(default = "default_priority_confidence")]
    pub priority_confidence: f32,

    #[serde(default)]
    pub topic_weights: TopicWeights,
}

fn default_acceptance_threshold() -> f32 {
    2.0
}

fn default_priority_confidence() -> f32 {
    0.95
}

impl Default for ClassifierTuning {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_acceptance_threshold(),
            priority_confidence: default_priority_confidence(),
            topic_weights: TopicWeights::default(),
        }
    }
}

impl ClassifierTuning {
    /// Reject values the scoring routine cannot work with
    pub fn validate(&self) -> Result<(), CampusError> {
        if !(self.acceptance_threshold.is_finite() && self.acceptance_threshold > 0.0) {
            return Err(CampusError::InvalidTuning(format!(
                "acceptance_threshold must be positive, got {}",
                self.acceptance_threshold
            )));
        }
        if !(self.priority_confidence > 0.0 && self.priority_confidence <= 1.0) {
            return Err(CampusError::InvalidTuning(format!(
                "priority_confidence must be in (0, 1], got {}",
                self.priority_confidence
            )));
        }
        for topic in Topic::ALL {
            let w = self.topic_weights.get(topic);
            if !(w.is_finite() && w >= 0.0) {
                return Err(CampusError::InvalidTuning(format!(
                    "weight for {} must be non-negative, got {}",
                    topic, w
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ClassifierTuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: ClassifierTuning =
            serde_json::from_str(r#"{"acceptance_threshold": 3.0, "topic_weights": {"menus": 2.0}}"#)
                .unwrap();
        assert_eq!(tuning.acceptance_threshold, 3.0);
        assert_eq!(tuning.priority_confidence, 0.95);
        assert_eq!(tuning.topic_weights.menus, 2.0);
        assert_eq!(tuning.topic_weights.buses, 1.2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut tuning = ClassifierTuning::default();
        tuning.acceptance_threshold = 0.0;
        assert!(tuning.validate().is_err());

        let mut tuning = ClassifierTuning::default();
        tuning.priority_confidence = 1.5;
        assert!(tuning.validate().is_err());

        let mut tuning = ClassifierTuning::default();
        tuning.topic_weights.events = -1.0;
        assert!(tuning.validate().is_err());
    }
}
