//! Shared types and pure pipeline stages for the campus assistant.
//!
//! Everything here is synchronous and side-effect free apart from the
//! session store. The async runtime (data access, fallback fixtures, the
//! agent entry point) lives in `campus-agent`.

pub mod action;
pub mod choice;
pub mod classifier;
pub mod dialogue;
pub mod entities;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod planner;
pub mod render;
pub mod scoring;
pub mod session;
pub mod tuning;

pub use action::{Action, ActionResult, DataSource, QueryParams, Record, Tool};
pub use choice::{Chooser, FirstChooser, RandomChooser, SeededChooser};
pub use classifier::IntentClassifier;
pub use entities::{EntityField, Entities};
pub use error::CampusError;
pub use intent::{ConversationType, Intent, IntentAnalysis, Topic, TopicScore};
pub use knowledge::{KnowledgeAnswer, KnowledgeBase, KnowledgeBucket, KnowledgeEntry, KnowledgeSource};
pub use planner::ActionPlanner;
pub use render::ResponseSynthesizer;
pub use session::{ConversationHistory, ConversationTurn, SessionId, SessionStore, Utterance};
pub use tuning::{ClassifierTuning, TopicWeights};

/// Default bound for a session's turn history
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default bound on live sessions in a `SessionStore`
pub const DEFAULT_MAX_SESSIONS: usize = 1024;
