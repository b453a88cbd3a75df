//! Action planner: (intent, entities) -> ordered retrieval actions.
//!
//! Pure and deterministic. Conversational turns never plan a backend call.
//! The reference date is passed in so timeframes resolve without reading
//! the clock.

use crate::action::{Action, Tool};
use crate::entities::{Entities, EntityField};
use crate::intent::{Intent, IntentAnalysis};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Default page size for events and updates
pub const DEFAULT_LIST_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct ActionPlanner {
    events_limit: usize,
    updates_limit: usize,
}

impl Default for ActionPlanner {
    fn default() -> Self {
        Self {
            events_limit: DEFAULT_LIST_LIMIT,
            updates_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ActionPlanner {
    pub fn with_limits(events_limit: usize, updates_limit: usize) -> Self {
        Self {
            events_limit,
            updates_limit,
        }
    }

    /// Plan from a classifier analysis
    pub fn plan_analysis(&self, analysis: &IntentAnalysis, query: &str, today: NaiveDate) -> Vec<Action> {
        self.plan(
            analysis.intent,
            &analysis.entities,
            analysis.is_campus_info_request,
            query,
            today,
        )
    }

    pub fn plan(
        &self,
        intent: Intent,
        entities: &Entities,
        is_campus_info_request: bool,
        query: &str,
        today: NaiveDate,
    ) -> Vec<Action> {
        if !is_campus_info_request {
            return Vec::new();
        }

        let date = entities
            .get(EntityField::Timeframe)
            .and_then(|tf| resolve_timeframe(tf, today))
            .map(|d| d.format("%Y-%m-%d").to_string());

        let action = match intent {
            Intent::Schedules => Action::new(Tool::Schedules)
                .with_opt_param("date", date)
                .with_opt_param("subject", entities.get(EntityField::Subject)),
            Intent::Menus => Action::new(Tool::Menus)
                .with_opt_param("date", date)
                .with_opt_param("mealType", entities.get(EntityField::MealType)),
            Intent::Buses => Action::new(Tool::Buses)
                .with_opt_param("destination", entities.get(EntityField::Destination))
                .with_opt_param("date", date),
            Intent::Events => Action::new(Tool::Events)
                .with_param("upcoming", "true")
                .with_param("limit", self.events_limit.to_string())
                .with_opt_param("date", date),
            Intent::Updates => {
                Action::new(Tool::Updates).with_param("limit", self.updates_limit.to_string())
            }
            Intent::Faqs => {
                if wants_faq_listing(query) {
                    Action::new(Tool::Faqs)
                } else {
                    Action::new(Tool::FaqSearch).with_param("q", query.trim())
                }
            }
            Intent::Weather | Intent::GeneralKnowledge | Intent::Conversation => return Vec::new(),
        };

        vec![action]
    }
}

/// Literal FAQ wording asks for the whole list rather than a search
fn wants_faq_listing(query: &str) -> bool {
    let lower = query.to_lowercase();
    lower.contains("faq") || lower.contains("frequently asked")
}

/// Resolve a timeframe entity against the reference date.
/// Weekdays resolve to the next occurrence, today included.
pub fn resolve_timeframe(timeframe: &str, today: NaiveDate) -> Option<NaiveDate> {
    match timeframe {
        "today" | "tonight" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        other => {
            let target: Weekday = other.parse().ok()?;
            let ahead = (7 + target.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
            today.checked_add_days(Days::new(u64::from(ahead)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::IntentClassifier;

    fn day() -> NaiveDate {
        // A Wednesday
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn plan_text(text: &str) -> Vec<Action> {
        let analysis = IntentClassifier::default().classify(text);
        ActionPlanner::default().plan_analysis(&analysis, text, day())
    }

    #[test]
    fn test_conversation_plans_nothing() {
        assert!(plan_text("Hello!").is_empty());
        assert!(plan_text("what is the weather today").is_empty());
        assert!(plan_text("Who is Einstein?").is_empty());
    }

    #[test]
    fn test_not_campus_request_is_empty_for_any_intent() {
        let planner = ActionPlanner::default();
        let entities = Entities::default();
        for intent in [Intent::Menus, Intent::Buses, Intent::Faqs, Intent::Events] {
            assert!(planner.plan(intent, &entities, false, "x", day()).is_empty());
        }
    }

    #[test]
    fn test_hungry_plans_single_menu_fetch() {
        let actions = plan_text("I'm hungry");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].tool, Tool::Menus);
        assert!(actions[0].params.is_empty());
    }

    #[test]
    fn test_faq_listing_vs_search() {
        let actions = plan_text("show me frequently asked questions");
        assert_eq!(actions, vec![Action::new(Tool::Faqs)]);
        assert_eq!(actions[0].param("q"), None);

        let actions = plan_text("How do I register for classes?");
        assert_eq!(actions[0].tool, Tool::FaqSearch);
        assert_eq!(actions[0].param("q"), Some("How do I register for classes?"));
    }

    #[test]
    fn test_menu_params_from_entities() {
        let actions = plan_text("What's for lunch today?");
        assert_eq!(actions[0].param("mealType"), Some("lunch"));
        assert_eq!(actions[0].param("date"), Some("2026-10-14"));
    }

    #[test]
    fn test_events_have_pagination() {
        let actions = plan_text("any events happening this weekend?");
        assert_eq!(actions[0].tool, Tool::Events);
        assert_eq!(actions[0].param("upcoming"), Some("true"));
        assert_eq!(actions[0].param("limit"), Some("10"));
    }

    #[test]
    fn test_resolve_timeframe() {
        assert_eq!(resolve_timeframe("today", day()), Some(day()));
        assert_eq!(
            resolve_timeframe("tomorrow", day()),
            NaiveDate::from_ymd_opt(2026, 10, 15)
        );
        assert_eq!(resolve_timeframe("wednesday", day()), Some(day()));
        assert_eq!(
            resolve_timeframe("monday", day()),
            NaiveDate::from_ymd_opt(2026, 10, 19)
        );
        assert_eq!(resolve_timeframe("someday", day()), None);
    }

    #[test]
    fn test_planning_is_deterministic() {
        let a = plan_text("next bus to downtown tomorrow");
        let b = plan_text("next bus to downtown tomorrow");
        assert_eq!(a, b);
        assert_eq!(a[0].param("destination"), Some("downtown"));
        assert_eq!(a[0].param("date"), Some("2026-10-15"));
    }
}
