//! Response synthesizer.
//!
//! Structured intents get a per-tool formatter with a fixed item cap and a
//! "...and N more" note past the cap, wrapped in a random preamble and
//! postscript. Conversational turns get a canned reply for their type plus a
//! nudge toward a near-miss topic. Phrasing is cosmetic; item content is
//! deterministic.

use crate::action::{ActionResult, Record, Tool};
use crate::choice::Chooser;
use crate::dialogue;
use crate::intent::{Intent, IntentAnalysis};
use crate::knowledge::KnowledgeAnswer;
use serde_json::Value;
use std::sync::Arc;

/// Items shown for schedules
pub const SCHEDULE_CAP: usize = 5;
/// Items shown for buses
pub const BUS_CAP: usize = 5;
/// Items shown per meal type
pub const MENU_PER_MEAL_CAP: usize = 3;
/// Items shown for FAQs, events and updates
pub const LIST_CAP: usize = 3;

/// Meal types in display order
const MEAL_ORDER: &[&str] = &["breakfast", "lunch", "dinner", "snack"];

pub struct ResponseSynthesizer {
    chooser: Arc<dyn Chooser>,
    threshold: f32,
}

impl ResponseSynthesizer {
    /// `threshold` is the classifier's acceptance threshold, used to spot
    /// near-miss topics
    pub fn new(chooser: Arc<dyn Chooser>, threshold: f32) -> Self {
        Self { chooser, threshold }
    }

    pub fn render(
        &self,
        analysis: &IntentAnalysis,
        results: &[ActionResult],
        knowledge: Option<&KnowledgeAnswer>,
    ) -> String {
        match analysis.intent {
            Intent::Schedules
            | Intent::Menus
            | Intent::Buses
            | Intent::Events
            | Intent::Updates
            | Intent::Faqs => {
                if results.is_empty() {
                    self.render_conversation(analysis)
                } else {
                    self.render_structured(results)
                }
            }
            Intent::Weather => dialogue::weather_reply(self.chooser.as_ref()).to_string(),
            Intent::GeneralKnowledge => match knowledge {
                Some(k) => k.answer.clone(),
                None => self.render_conversation(analysis),
            },
            Intent::Conversation => self.render_conversation(analysis),
        }
    }

    fn render_conversation(&self, analysis: &IntentAnalysis) -> String {
        let reply = dialogue::conversation_reply(self.chooser.as_ref(), analysis.conversation_type);
        match analysis.near_miss(self.threshold) {
            Some(topic) => format!("{} {}", reply, dialogue::nudge(topic)),
            None => reply.to_string(),
        }
    }

    fn render_structured(&self, results: &[ActionResult]) -> String {
        let sections: Vec<String> = results
            .iter()
            .filter(|r| r.success)
            .map(format_result)
            .collect();

        if sections.is_empty() {
            return dialogue::RETRIEVAL_APOLOGY.to_string();
        }

        let partial = results.iter().any(|r| !r.success);
        let nothing_found = results
            .iter()
            .filter(|r| r.success)
            .all(|r| r.records().is_empty());

        // Empty-result messages stand alone, without "here's what I found"
        let mut out = if nothing_found {
            sections.join("\n\n")
        } else {
            format!(
                "{}\n\n{}",
                dialogue::preamble(self.chooser.as_ref()),
                sections.join("\n\n")
            )
        };
        if partial {
            out.push_str("\n\nSome of the information couldn't be loaded right now.");
        }
        if !nothing_found {
            out.push_str("\n\n");
            out.push_str(dialogue::postscript(self.chooser.as_ref()));
        }
        out
    }
}

/// Render one successful result
pub fn format_result(result: &ActionResult) -> String {
    let records = result.records();
    match result.action {
        Tool::Schedules => format_list(
            "Class schedule",
            "I couldn't find any classes matching that.",
            records,
            SCHEDULE_CAP,
            schedule_line,
        ),
        Tool::Menus => format_menus(records),
        Tool::Buses => format_list(
            "Bus departures",
            "I couldn't find any buses matching that.",
            records,
            BUS_CAP,
            bus_line,
        ),
        Tool::Events => format_list(
            "Upcoming events",
            "There are no upcoming events listed right now.",
            records,
            LIST_CAP,
            event_line,
        ),
        Tool::Updates => format_list(
            "Campus updates",
            "There are no campus updates right now.",
            records,
            LIST_CAP,
            update_line,
        ),
        Tool::Faqs | Tool::FaqSearch => format_list(
            "Frequently asked questions",
            "I couldn't find an FAQ about that. Try rephrasing, or ask to see all FAQs.",
            records,
            LIST_CAP,
            faq_line,
        ),
    }
}

fn truncation_note(total: usize, cap: usize) -> Option<String> {
    (total > cap).then(|| format!("...and {} more", total - cap))
}

fn format_list(
    title: &str,
    empty: &str,
    records: &[Record],
    cap: usize,
    line: fn(&Record) -> String,
) -> String {
    if records.is_empty() {
        return empty.to_string();
    }
    let mut lines = vec![format!("{}:", title)];
    lines.extend(records.iter().take(cap).map(|r| format!("- {}", line(r))));
    lines.extend(truncation_note(records.len(), cap));
    lines.join("\n")
}

fn format_menus(records: &[Record]) -> String {
    if records.is_empty() {
        return "I couldn't find any menu items matching that.".to_string();
    }

    let meal_of = |r: &Record| field(r, &["mealType", "meal_type", "meal"]).map(|m| m.to_lowercase());
    let mut groups: Vec<(String, Vec<&Record>)> = Vec::new();
    for record in records {
        let meal = meal_of(record).unwrap_or_else(|| "menu".to_string());
        match groups.iter_mut().find(|(m, _)| *m == meal) {
            Some((_, items)) => items.push(record),
            None => groups.push((meal, vec![record])),
        }
    }
    groups.sort_by_key(|(meal, _)| {
        MEAL_ORDER
            .iter()
            .position(|m| m == meal)
            .unwrap_or(MEAL_ORDER.len())
    });

    groups
        .iter()
        .map(|(meal, items)| {
            let mut lines = vec![format!("{}:", capitalize(meal))];
            lines.extend(
                items
                    .iter()
                    .take(MENU_PER_MEAL_CAP)
                    .map(|r| format!("- {}", menu_line(r))),
            );
            lines.extend(truncation_note(items.len(), MENU_PER_MEAL_CAP));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First present field among `keys`, as text
fn field(record: &Record, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match record.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn price(record: &Record) -> Option<f64> {
    match record.get("price")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').parse().ok(),
        _ => None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn join_present(parts: &[Option<String>], sep: &str) -> String {
    parts
        .iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join(sep)
}

fn schedule_line(r: &Record) -> String {
    let name = field(r, &["course", "name", "title"]).unwrap_or_else(|| "Class".to_string());
    let name = match field(r, &["code", "courseCode"]) {
        Some(code) => format!("{} ({})", name, code),
        None => name,
    };
    let time = match (field(r, &["startTime", "start"]), field(r, &["endTime", "end"])) {
        (Some(s), Some(e)) => Some(format!("{}-{}", s, e)),
        (Some(s), None) => Some(s),
        _ => None,
    };
    let when = join_present(&[field(r, &["day", "date"]), time], " ");
    let details = join_present(
        &[
            (!when.is_empty()).then_some(when),
            field(r, &["location", "room"]),
            field(r, &["instructor", "professor"]).map(|i| format!("with {}", i)),
        ],
        ", ",
    );
    if details.is_empty() {
        name
    } else {
        format!("{}: {}", name, details)
    }
}

fn menu_line(r: &Record) -> String {
    let mut line = field(r, &["name", "item", "title"]).unwrap_or_else(|| "Menu item".to_string());
    if let Some(p) = price(r) {
        line.push_str(&format!(" - ${:.2}", p));
    }
    if let Some(loc) = field(r, &["location", "diningHall"]) {
        line.push_str(&format!(" ({})", loc));
    }
    if let Some(Value::Array(tags)) = r.get("dietary") {
        let tags: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
        if !tags.is_empty() {
            line.push_str(&format!(" [{}]", tags.join(", ")));
        }
    }
    line
}

fn bus_line(r: &Record) -> String {
    let route = field(r, &["route", "routeName", "name"]).unwrap_or_else(|| "Bus".to_string());
    let mut line = match field(r, &["destination"]) {
        Some(dest) => format!("Route {} to {}", route, dest),
        None => format!("Route {}", route),
    };
    if let Some(dep) = field(r, &["departureTime", "departure", "time"]) {
        line.push_str(&format!(": departs {}", dep));
    }
    if let Some(stop) = field(r, &["stop", "from"]) {
        line.push_str(&format!(" from {}", stop));
    }
    if let Some(status) = field(r, &["status"]) {
        line.push_str(&format!(" ({})", status));
    }
    line
}

fn event_line(r: &Record) -> String {
    let title = field(r, &["title", "name"]).unwrap_or_else(|| "Event".to_string());
    let when = join_present(&[field(r, &["date"]), field(r, &["time", "startTime"])], " ");
    let mut line = title;
    if !when.is_empty() {
        line.push_str(&format!(" - {}", when));
    }
    if let Some(loc) = field(r, &["location", "venue"]) {
        line.push_str(&format!(" at {}", loc));
    }
    line
}

fn update_line(r: &Record) -> String {
    let title = field(r, &["title", "headline"]).unwrap_or_else(|| "Update".to_string());
    let mut line = match field(r, &["summary", "content", "body"]) {
        Some(summary) => format!("{}: {}", title, summary),
        None => title,
    };
    if let Some(date) = field(r, &["date", "publishedAt"]) {
        line.push_str(&format!(" ({})", date));
    }
    line
}

fn faq_line(r: &Record) -> String {
    let q = field(r, &["question", "title"]).unwrap_or_else(|| "Question".to_string());
    match field(r, &["answer", "content"]) {
        Some(a) => format!("Q: {}\n  A: {}", q, a),
        None => format!("Q: {}", q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::FirstChooser;
    use crate::classifier::IntentClassifier;
    use crate::intent::{ConversationType, Topic, TopicScore};
    use crate::knowledge::KnowledgeBase;
    use serde_json::json;

    fn synth() -> ResponseSynthesizer {
        ResponseSynthesizer::new(Arc::new(FirstChooser), 2.0)
    }

    fn menu_items() -> Vec<Record> {
        vec![
            json!({"name": "Grilled Chicken Sandwich", "price": 8.5, "mealType": "lunch"}),
            json!({"name": "Garden Salad", "price": "6.25", "mealType": "lunch", "dietary": ["vegan"]}),
            json!({"name": "Tomato Soup", "price": 4.0, "mealType": "lunch"}),
            json!({"name": "Veggie Wrap", "price": 7.0, "mealType": "lunch"}),
            json!({"name": "Pancakes", "price": 5.5, "mealType": "breakfast"}),
        ]
    }

    #[test]
    fn test_menu_caps_per_meal_and_orders_meals() {
        let text = format_menus(&menu_items());
        let breakfast = text.find("Breakfast:").unwrap();
        let lunch = text.find("Lunch:").unwrap();
        assert!(breakfast < lunch);
        assert!(text.contains("- Grilled Chicken Sandwich - $8.50"));
        assert!(text.contains("- Garden Salad - $6.25 [vegan]"));
        assert!(!text.contains("Veggie Wrap"));
        assert!(text.contains("...and 1 more"));
    }

    #[test]
    fn test_schedule_cap_is_five() {
        let records: Vec<Record> = (0..7)
            .map(|i| json!({"course": format!("Course {i}"), "day": "Monday", "startTime": "09:00", "endTime": "10:00"}))
            .collect();
        let text = format_result(&ActionResult::live(Tool::Schedules, records));
        assert!(text.contains("Course 4"));
        assert!(!text.contains("Course 5"));
        assert!(text.ends_with("...and 2 more"));
        assert!(text.contains("Course 0: Monday 09:00-10:00"));
    }

    #[test]
    fn test_faq_cap_is_three() {
        let records: Vec<Record> = (0..4)
            .map(|i| json!({"question": format!("Q{i}?"), "answer": "Yes."}))
            .collect();
        let text = format_result(&ActionResult::fallback(Tool::Faqs, records));
        assert!(text.contains("Q: Q2?\n  A: Yes."));
        assert!(!text.contains("Q3"));
        assert!(text.contains("...and 1 more"));
    }

    #[test]
    fn test_no_truncation_note_at_cap() {
        let records: Vec<Record> = (0..3).map(|i| json!({"title": format!("E{i}")})).collect();
        let text = format_result(&ActionResult::live(Tool::Events, records));
        assert!(!text.contains("more"));
    }

    #[test]
    fn test_structured_wraps_with_preamble_and_postscript() {
        let analysis = IntentClassifier::default().classify("What's for lunch today?");
        let results = vec![ActionResult::live(Tool::Menus, menu_items())];
        let text = synth().render(&analysis, &results, None);
        assert!(text.starts_with(dialogue::PREAMBLES[0]));
        assert!(text.ends_with(dialogue::POSTSCRIPTS[0]));
        assert!(text.contains("Grilled Chicken Sandwich"));
    }

    #[test]
    fn test_empty_results_skip_preamble_and_postscript() {
        let analysis = IntentClassifier::default().classify("next bus to downtown");
        let results = vec![ActionResult::live(Tool::Buses, Vec::new())];
        let text = synth().render(&analysis, &results, None);
        assert_eq!(text, "I couldn't find any buses matching that.");
        assert!(!text.contains(dialogue::PREAMBLES[0]));
    }

    #[test]
    fn test_all_failed_gives_apology() {
        let analysis = IntentClassifier::default().classify("next bus to downtown");
        let results = vec![ActionResult::failed(Tool::Buses, "down")];
        let text = synth().render(&analysis, &results, None);
        assert_eq!(text, dialogue::RETRIEVAL_APOLOGY);
        assert!(!text.contains("down"));
    }

    #[test]
    fn test_greeting_reply_from_fixed_set() {
        let analysis = IntentClassifier::default().classify("Hello!");
        let text = synth().render(&analysis, &[], None);
        assert!(dialogue::replies(ConversationType::Greeting).contains(&text.as_str()));
    }

    #[test]
    fn test_near_miss_nudge_appended() {
        let analysis = IntentAnalysis {
            intent: Intent::Conversation,
            confidence: 0.5,
            entities: Default::default(),
            detected_topics: vec![TopicScore::new(Topic::Events, 1.0)],
            is_campus_info_request: false,
            conversation_type: ConversationType::General,
        };
        let text = synth().render(&analysis, &[], None);
        assert!(text.contains("campus events"));
    }

    #[test]
    fn test_knowledge_answer_passthrough() {
        let kb = KnowledgeBase::builtin();
        let analysis = IntentClassifier::default().classify("Who is Einstein?");
        let answer = kb.answer("Who is Einstein?");
        let text = synth().render(&analysis, &[], Some(&answer));
        assert_eq!(text, answer.answer);
    }

    #[test]
    fn test_weather_reply() {
        let analysis = IntentClassifier::default().classify("is it going to rain?");
        let text = synth().render(&analysis, &[], None);
        assert_eq!(text, dialogue::WEATHER_REPLIES[0]);
    }
}
