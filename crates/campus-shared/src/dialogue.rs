//! Canned dialogue: conversational replies, data preambles and postscripts.

use crate::choice::{choose, Chooser};
use crate::intent::{ConversationType, Topic};

/// Reply variants for a conversational turn
pub fn replies(conversation_type: ConversationType) -> &'static [&'static str] {
    match conversation_type {
        ConversationType::Greeting => &[
            "Hi there! I can help with class schedules, dining menus, bus times, events and campus news. What do you need?",
            "Hello! Ask me about your classes, what's for lunch, the next bus or what's happening on campus.",
            "Hey! Good to see you. What can I look up for you today?",
            "Hi! I'm your campus assistant. Schedules, menus, buses, events, updates and FAQs are all fair game.",
        ],
        ConversationType::Farewell => &[
            "Bye for now! Come back any time you need campus info.",
            "See you later! Good luck with everything.",
            "Take care! I'll be here if you need anything.",
        ],
        ConversationType::Gratitude => &[
            "You're welcome! Anything else I can help with?",
            "Happy to help! Let me know if you need anything else.",
            "Any time! That's what I'm here for.",
        ],
        ConversationType::Joke => &[
            "Why did the student eat their homework? Because the teacher said it was a piece of cake!",
            "I told my professor a joke about procrastination. I'll tell you the punchline later.",
            "Why was the math book sad? It had too many problems.",
            "Why don't scientists trust atoms? Because they make up everything!",
        ],
        ConversationType::Motivation => &[
            "You've got this! Every lecture, every page and every problem set moves you forward.",
            "Progress beats perfection. Take the next small step and the rest will follow.",
            "Remember why you started. One focused hour today is worth more than a perfect plan for tomorrow.",
        ],
        ConversationType::StudyTips => &[
            "Try the Pomodoro technique: 25 minutes of focused study, then a 5 minute break. After four rounds, take a longer one.",
            "Active recall works better than re-reading. Close the book and quiz yourself, then check what you missed.",
            "Spread your study sessions over several days instead of cramming. Spaced repetition really sticks.",
        ],
        ConversationType::StressRelief => &[
            "That sounds like a lot. Take a slow breath: in for four, hold for four, out for four. You don't have to solve everything at once.",
            "It's okay to feel overwhelmed. Try writing down the three most important tasks and start with the smallest one.",
            "Be kind to yourself. A short walk, some water and a bit of sleep go a long way. Campus counseling is there if you need to talk.",
        ],
        ConversationType::CasualInquiry => &[
            "I'm doing great, thanks for asking! How can I help you today?",
            "All good here, just keeping an eye on the campus. What's up with you?",
            "Pretty good! Ready to look something up for you.",
        ],
        ConversationType::Identity => &[
            "I'm the campus assistant. I answer questions about schedules, dining, buses, events, campus updates and FAQs.",
            "I'm a campus information bot. Ask me about classes, food, transport or what's happening around campus.",
        ],
        ConversationType::Help => &[
            "I can look up class schedules, dining menus, bus times, campus events, news updates and FAQs. Try \"What's for lunch today?\" or \"Next bus to downtown\".",
            "Here's what I can do: schedules, menus, buses, events, updates and FAQs. Ask in your own words, like \"When is my physics lecture?\"",
        ],
        ConversationType::General => &[
            "I'm not sure I follow, but I'm happy to help with campus information like schedules, menus, buses and events.",
            "Interesting! If you need anything campus-related, such as class times or what's for dinner, just ask.",
            "Got it. I'm best at campus info: schedules, dining, buses, events, updates and FAQs.",
        ],
    }
}

/// Reply to weather wording; no live weather source is wired in
pub const WEATHER_REPLIES: &[&str] = &[
    "I don't have live weather data, so check a weather app or service for the forecast. I can tell you about bus times or indoor events on campus, though!",
    "Weather is outside what I can see right now. A weather service will have the latest forecast. Want me to check the bus schedule or today's events instead?",
];

/// Opening lines for data answers
pub const PREAMBLES: &[&str] = &[
    "Here's what I found:",
    "Sure! Here you go:",
    "Good question! Here's the latest:",
    "Let me pull that up for you:",
];

/// Closing lines for data answers
pub const POSTSCRIPTS: &[&str] = &[
    "Anything else I can help with?",
    "Let me know if you need more details.",
    "Hope that helps!",
    "Just ask if you need anything else.",
];

/// Shown when every retrieval failed
pub const RETRIEVAL_APOLOGY: &str =
    "Sorry, I couldn't reach the campus information service right now. Please try again in a moment.";

/// Shown when the pipeline itself failed
pub const PIPELINE_APOLOGY: &str =
    "Sorry, something went wrong on my end while handling that. Please try again in a moment.";

pub fn conversation_reply(chooser: &dyn Chooser, conversation_type: ConversationType) -> &'static str {
    choose(chooser, replies(conversation_type))
}

pub fn weather_reply(chooser: &dyn Chooser) -> &'static str {
    choose(chooser, WEATHER_REPLIES)
}

pub fn preamble(chooser: &dyn Chooser) -> &'static str {
    choose(chooser, PREAMBLES)
}

pub fn postscript(chooser: &dyn Chooser) -> &'static str {
    choose(chooser, POSTSCRIPTS)
}

/// Soft pointer at a near-miss topic
pub fn nudge(topic: Topic) -> String {
    format!("By the way, you might also be interested in {}. Just ask!", topic.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::FirstChooser;

    #[test]
    fn test_every_type_has_replies() {
        let types = [
            ConversationType::Greeting,
            ConversationType::Farewell,
            ConversationType::Gratitude,
            ConversationType::Joke,
            ConversationType::Motivation,
            ConversationType::StudyTips,
            ConversationType::StressRelief,
            ConversationType::CasualInquiry,
            ConversationType::Identity,
            ConversationType::Help,
            ConversationType::General,
        ];
        for t in types {
            assert!(!replies(t).is_empty(), "{t}");
            assert!(!conversation_reply(&FirstChooser, t).is_empty());
        }
    }

    #[test]
    fn test_nudge_names_topic() {
        assert!(nudge(Topic::Buses).contains("bus times"));
    }
}
