//! Fixture provider: static, shape-compatible stand-in for the live backend.
//!
//! Served when the live call fails. Records carry the same fields the live
//! endpoints return, and the query parameters that narrow a result
//! (`subject`, `mealType`, `destination`, `q`, `limit`) are honored so the
//! degraded answer still fits the question. Date filters are ignored.

use crate::error::FixtureError;
use async_trait::async_trait;
use campus_shared::{QueryParams, Record};
use serde_json::{json, Value};
use std::sync::LazyLock;
use tracing::debug;

#[async_trait]
pub trait FixtureProvider: Send + Sync {
    /// Records for a logical path, shaped like the live `data` field
    async fn mock_call(&self, path: &str, params: &QueryParams) -> Result<Vec<Record>, FixtureError>;
}

static SCHEDULES: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({"course": "Introduction to Computer Science", "code": "CS 101", "subject": "computer science", "day": "Monday", "startTime": "09:00", "endTime": "10:15", "location": "Turing Hall 110", "instructor": "Dr. Patel"}),
        json!({"course": "Calculus I", "code": "MATH 151", "subject": "mathematics", "day": "Monday", "startTime": "11:00", "endTime": "11:50", "location": "Noether Building 204", "instructor": "Prof. Alvarez"}),
        json!({"course": "General Chemistry", "code": "CHEM 110", "subject": "chemistry", "day": "Tuesday", "startTime": "10:00", "endTime": "11:15", "location": "Science Center 3", "instructor": "Dr. Okafor"}),
        json!({"course": "Principles of Biology", "code": "BIO 120", "subject": "biology", "day": "Wednesday", "startTime": "13:00", "endTime": "14:15", "location": "Life Sciences 150", "instructor": "Dr. Lindqvist"}),
        json!({"course": "Data Structures", "code": "CS 201", "subject": "computer science", "day": "Wednesday", "startTime": "15:00", "endTime": "16:15", "location": "Turing Hall 210", "instructor": "Prof. Nakamura"}),
        json!({"course": "Introductory Physics", "code": "PHYS 101", "subject": "physics", "day": "Thursday", "startTime": "09:30", "endTime": "10:45", "location": "Science Center 1", "instructor": "Dr. Mensah"}),
        json!({"course": "World History", "code": "HIST 105", "subject": "history", "day": "Friday", "startTime": "12:00", "endTime": "12:50", "location": "Humanities 301", "instructor": "Prof. Dubois"}),
    ]
});

static MENUS: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({"name": "Buttermilk Pancakes", "price": 5.50, "mealType": "breakfast", "location": "Main Dining Hall", "dietary": ["vegetarian"]}),
        json!({"name": "Veggie Egg Scramble", "price": 6.25, "mealType": "breakfast", "location": "Main Dining Hall", "dietary": ["vegetarian", "gluten-free"]}),
        json!({"name": "Grilled Chicken Sandwich", "price": 8.50, "mealType": "lunch", "location": "Main Dining Hall", "dietary": []}),
        json!({"name": "Garden Salad Bowl", "price": 7.25, "mealType": "lunch", "location": "Green Cafe", "dietary": ["vegan", "gluten-free"]}),
        json!({"name": "Tomato Basil Soup", "price": 4.75, "mealType": "lunch", "location": "Main Dining Hall", "dietary": ["vegetarian"]}),
        json!({"name": "Margherita Flatbread", "price": 7.95, "mealType": "lunch", "location": "Student Union Grill", "dietary": ["vegetarian"]}),
        json!({"name": "Teriyaki Salmon", "price": 11.50, "mealType": "dinner", "location": "Main Dining Hall", "dietary": ["gluten-free"]}),
        json!({"name": "Black Bean Burrito", "price": 8.75, "mealType": "dinner", "location": "Student Union Grill", "dietary": ["vegan"]}),
        json!({"name": "Pasta Primavera", "price": 9.25, "mealType": "dinner", "location": "Main Dining Hall", "dietary": ["vegetarian"]}),
        json!({"name": "Fruit Cup", "price": 2.50, "mealType": "snack", "location": "Green Cafe", "dietary": ["vegan", "gluten-free"]}),
    ]
});

static BUSES: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({"route": "10", "destination": "Downtown", "departureTime": "08:15", "stop": "Student Union", "status": "on time"}),
        json!({"route": "10", "destination": "Downtown", "departureTime": "08:45", "stop": "Student Union", "status": "on time"}),
        json!({"route": "22", "destination": "North Campus", "departureTime": "08:20", "stop": "Library Loop", "status": "delayed 5 min"}),
        json!({"route": "7", "destination": "Train Station", "departureTime": "08:30", "stop": "Main Gate", "status": "on time"}),
        json!({"route": "X1", "destination": "Airport", "departureTime": "09:00", "stop": "Main Gate", "status": "on time"}),
        json!({"route": "15", "destination": "Medical Center", "departureTime": "09:10", "stop": "Science Center", "status": "on time"}),
        json!({"route": "3", "destination": "Main Library", "departureTime": "08:05", "stop": "Residence Halls", "status": "on time"}),
        json!({"route": "5", "destination": "Campus Stadium", "departureTime": "17:30", "stop": "Main Gate", "status": "on time"}),
        json!({"route": "12", "destination": "Riverside Mall", "departureTime": "10:15", "stop": "Student Union", "status": "on time"}),
        json!({"route": "12", "destination": "City Center", "departureTime": "10:40", "stop": "Student Union", "status": "delayed 10 min"}),
        json!({"route": "3", "destination": "Residence Halls (Dorms)", "departureTime": "18:05", "stop": "Main Library", "status": "on time"}),
        json!({"route": "22", "destination": "South Campus", "departureTime": "08:50", "stop": "Library Loop", "status": "on time"}),
    ]
});

static EVENTS: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({"title": "Fall Career Fair", "date": "2026-10-21", "time": "10:00", "location": "Student Union Ballroom"}),
        json!({"title": "Guest Lecture: The Future of Energy", "date": "2026-10-22", "time": "16:00", "location": "Science Center Auditorium"}),
        json!({"title": "International Food Festival", "date": "2026-10-24", "time": "12:00", "location": "Central Quad"}),
        json!({"title": "Homecoming Football Game", "date": "2026-10-25", "time": "18:30", "location": "Campus Stadium"}),
        json!({"title": "Study Skills Workshop", "date": "2026-10-27", "time": "14:00", "location": "Library Room 2B"}),
    ]
});

static UPDATES: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({"title": "Library extends hours", "summary": "The main library is open until 2 AM during midterms.", "date": "2026-10-15"}),
        json!({"title": "Parking lot C closed", "summary": "Lot C is closed for resurfacing through Friday. Use lot D.", "date": "2026-10-14"}),
        json!({"title": "Flu shot clinic", "summary": "Free flu shots at the Health Center, no appointment needed.", "date": "2026-10-12"}),
        json!({"title": "Spring registration dates", "summary": "Registration for spring classes opens November 3.", "date": "2026-10-10"}),
    ]
});

static FAQS: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        json!({"question": "How do I register for classes?", "answer": "Log in to the student portal, open Registration and add courses during your assigned window.", "category": "academics"}),
        json!({"question": "How do I reset my campus account password?", "answer": "Use the self-service reset page or visit the IT help desk in the library.", "category": "technology"}),
        json!({"question": "Where can I get a parking permit?", "answer": "Parking permits are sold online through Transportation Services and at the Student Union office.", "category": "transportation"}),
        json!({"question": "How do I add money to my meal plan?", "answer": "Add dining dollars in the student portal under Meal Plan, or at any dining hall register.", "category": "dining"}),
        json!({"question": "When is the library open?", "answer": "The main library is open 7 AM to midnight on weekdays and 10 AM to 10 PM on weekends.", "category": "facilities"}),
        json!({"question": "How do I request a transcript?", "answer": "Request official transcripts from the Registrar's page in the student portal.", "category": "academics"}),
    ]
});

/// Words that never narrow an FAQ search
const SEARCH_STOPWORDS: &[&str] = &[
    "what", "when", "where", "which", "does", "have", "your", "that", "this", "there", "from",
    "with", "about", "will", "should", "could", "would", "campus", "please", "tell",
];

/// Built-in fixture datasets
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticFixtures;

impl StaticFixtures {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous lookup backing `mock_call`
    pub fn records(&self, path: &str, params: &QueryParams) -> Result<Vec<Record>, FixtureError> {
        let path = path.trim_matches('/');
        let mut records = match path {
            "schedules" => filter_field(&SCHEDULES, &["course", "code", "subject"], params.get("subject")),
            "menus" => filter_exact(&MENUS, "mealType", params.get("mealType")),
            "buses" => or_all(
                &BUSES,
                filter_field(&BUSES, &["destination"], params.get("destination")),
            ),
            "events" => EVENTS.clone(),
            "updates" => UPDATES.clone(),
            "faqs" => FAQS.clone(),
            "faqs/search" => search_faqs(params.get("q").map(String::as_str).unwrap_or("")),
            other => return Err(FixtureError::UnknownPath(other.to_string())),
        };
        if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
            records.truncate(limit);
        }
        Ok(records)
    }
}

#[async_trait]
impl FixtureProvider for StaticFixtures {
    async fn mock_call(&self, path: &str, params: &QueryParams) -> Result<Vec<Record>, FixtureError> {
        self.records(path, params)
    }
}

fn text_of(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

/// Keep records where any of `keys` contains the wanted value (case and
/// whitespace insensitive). No value means no filter.
fn filter_field(records: &[Value], keys: &[&str], wanted: Option<&String>) -> Vec<Value> {
    let Some(wanted) = wanted else {
        return records.to_vec();
    };
    let squash = |s: &str| s.to_lowercase().split_whitespace().collect::<String>();
    let wanted = squash(wanted);
    records
        .iter()
        .filter(|r| keys.iter().any(|k| squash(&text_of(r, k)).contains(&wanted)))
        .cloned()
        .collect()
}

/// Every route beats an empty list when the destination is unknown
fn or_all(records: &[Value], filtered: Vec<Value>) -> Vec<Value> {
    if filtered.is_empty() {
        debug!("no fixture route matches the destination, serving all routes");
        return records.to_vec();
    }
    filtered
}

fn filter_exact(records: &[Value], key: &str, wanted: Option<&String>) -> Vec<Value> {
    let Some(wanted) = wanted else {
        return records.to_vec();
    };
    let wanted = wanted.to_lowercase();
    records
        .iter()
        .filter(|r| text_of(r, key) == wanted)
        .cloned()
        .collect()
}

/// Rank FAQs by how many significant query words they mention
fn search_faqs(query: &str) -> Vec<Value> {
    let lower = query.to_lowercase();
    let terms: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 4 && !SEARCH_STOPWORDS.contains(w))
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, &Value)> = FAQS
        .iter()
        .map(|faq| {
            let haystack = format!("{} {}", text_of(faq, "question"), text_of(faq, "answer"));
            (terms.iter().filter(|t| haystack.contains(*t)).count(), faq)
        })
        .filter(|(hits, _)| *hits > 0)
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().map(|(_, faq)| faq.clone()).collect()
}
