//! Campus agent: the single `process_message` entry point.
//!
//! classify -> plan -> execute -> (knowledge) -> render -> append turn.
//! The call never fails and never panics out: errors and panics inside the
//! pipeline become a `success = false` response with a user-safe apology.

use crate::config::Config;
use crate::data_access::{DataAccess, HttpDataAccess, OfflineDataAccess};
use crate::error::AgentError;
use crate::executor::{StatsSnapshot, ToolExecutor};
use crate::fixtures::{FixtureProvider, StaticFixtures};
use campus_shared::{
    ActionPlanner, ActionResult, Chooser, ConversationTurn, Intent, IntentClassifier,
    KnowledgeBase, RandomChooser, ResponseSynthesizer, SessionId, SessionStore, Utterance,
};
use chrono::NaiveDate;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Intent tag reported when the pipeline itself failed
pub const ERROR_INTENT: &str = "error";

/// Result of one `process_message` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    pub response: String,
    pub intent: String,
    pub confidence: f32,
    pub is_campus_info_request: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Some action was served from fixtures or failed
    #[serde(default)]
    pub degraded: bool,
}

impl ProcessResponse {
    fn failure(err: &AgentError) -> Self {
        Self {
            success: false,
            response: err.user_message().to_string(),
            intent: ERROR_INTENT.to_string(),
            confidence: 0.0,
            is_campus_info_request: false,
            error: Some(err.to_string()),
            degraded: false,
        }
    }
}

pub struct CampusAgent {
    classifier: IntentClassifier,
    planner: ActionPlanner,
    executor: ToolExecutor,
    knowledge: KnowledgeBase,
    chooser: Arc<dyn Chooser>,
    sessions: Arc<SessionStore>,
    session_id: SessionId,
    max_input_chars: usize,
    reference_date: Option<NaiveDate>,
}

impl CampusAgent {
    /// Agent with default tuning, built-in knowledge and a private session
    pub fn new(data: Arc<dyn DataAccess>, fixtures: Arc<dyn FixtureProvider>) -> Self {
        Self {
            classifier: IntentClassifier::default(),
            planner: ActionPlanner::default(),
            executor: ToolExecutor::new(data, fixtures),
            knowledge: KnowledgeBase::builtin(),
            chooser: Arc::new(RandomChooser),
            sessions: Arc::new(SessionStore::default()),
            session_id: SessionId::new(),
            max_input_chars: crate::config::AgentConfig::default().max_input_chars,
            reference_date: None,
        }
    }

    /// Agent wired from config: live HTTP tier (or offline), built-in
    /// fixtures, tuned classifier, extra knowledge entries
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let data: Arc<dyn DataAccess> = if config.agent.offline {
            info!("Offline mode, answering from fixture data");
            Arc::new(OfflineDataAccess)
        } else {
            Arc::new(HttpDataAccess::new(&config.api.base_url, config.api.timeout())?)
        };

        let mut knowledge = KnowledgeBase::builtin();
        if let Some(path) = &config.knowledge.extra_entries {
            knowledge.load_json_file(path)?;
        }

        let sessions = Arc::new(SessionStore::with_max_sessions(
            config.session.history_capacity,
            config.session.max_sessions,
        ));
        Ok(Self::new(data, Arc::new(StaticFixtures::new()))
            .with_classifier(IntentClassifier::new(config.classifier.clone())?)
            .with_knowledge(knowledge)
            .with_session(sessions, SessionId::new())
            .with_max_input_chars(config.agent.max_input_chars))
    }

    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_planner(mut self, planner: ActionPlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Attach to a (possibly shared) session store under `id`
    pub fn with_session(mut self, sessions: Arc<SessionStore>, id: SessionId) -> Self {
        self.sessions = sessions;
        self.session_id = id;
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    /// Fix the date timeframes resolve against (defaults to the local date)
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn history(&self) -> Vec<ConversationTurn> {
        self.sessions.history(self.session_id)
    }

    pub fn clear_history(&self) {
        self.sessions.clear(self.session_id);
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.executor.stats()
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Process one user message. Always returns a well-formed response.
    pub async fn process_message(&self, text: &str) -> ProcessResponse {
        match AssertUnwindSafe(self.run_pipeline(text)).catch_unwind().await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, "Message rejected");
                ProcessResponse::failure(&e)
            }
            Err(payload) => {
                let e = AgentError::Panicked(panic_message(payload.as_ref()));
                error!(error = %e, "Pipeline panicked");
                ProcessResponse::failure(&e)
            }
        }
    }

    fn validate(&self, text: &str) -> Result<Utterance, AgentError> {
        let text = text.trim();
        let len = text.chars().count();
        if len > self.max_input_chars {
            return Err(AgentError::MessageTooLong {
                len,
                max: self.max_input_chars,
            });
        }
        Ok(Utterance::new(text))
    }

    async fn run_pipeline(&self, text: &str) -> Result<ProcessResponse, AgentError> {
        let utterance = self.validate(text)?;

        let analysis = self.classifier.classify(&utterance.text);
        info!(
            intent = %analysis.intent,
            confidence = analysis.confidence,
            campus = analysis.is_campus_info_request,
            conversation = %analysis.conversation_type,
            "Classified message"
        );

        let actions = self
            .planner
            .plan_analysis(&analysis, &utterance.text, self.today());
        debug!(actions = actions.len(), "Planned actions");

        let results = self.executor.execute(&actions).await;
        let degraded = results.iter().any(ActionResult::is_degraded);

        let knowledge = (analysis.intent == Intent::GeneralKnowledge)
            .then(|| self.knowledge.answer(&utterance.text));

        let synthesizer = ResponseSynthesizer::new(
            self.chooser.clone(),
            self.classifier.tuning().acceptance_threshold,
        );
        let response = synthesizer.render(&analysis, &results, knowledge.as_ref());

        // Blank input gets a reply but leaves no turn behind
        if !utterance.text.is_empty() {
            self.sessions.append(
                self.session_id,
                ConversationTurn {
                    user_text: utterance.text.clone(),
                    intent: analysis.intent,
                    is_campus_info: analysis.is_campus_info_request,
                    response: response.clone(),
                    timestamp: utterance.timestamp,
                },
            );
        }

        Ok(ProcessResponse {
            success: true,
            response,
            intent: analysis.intent.as_str().to_string(),
            confidence: analysis.confidence,
            is_campus_info_request: analysis.is_campus_info_request,
            error: None,
            degraded,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_shared::FirstChooser;

    fn offline_agent() -> CampusAgent {
        CampusAgent::new(Arc::new(OfflineDataAccess), Arc::new(StaticFixtures))
            .with_chooser(Arc::new(FirstChooser))
            .with_reference_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[tokio::test]
    async fn test_blank_message_gets_conversational_reply() {
        let agent = offline_agent();
        for text in ["", "   "] {
            let resp = agent.process_message(text).await;
            assert!(resp.success);
            assert_eq!(resp.intent, "conversation");
            assert!(!resp.is_campus_info_request);
            assert!(resp.error.is_none());
            let replies = campus_shared::dialogue::replies(campus_shared::ConversationType::General);
            assert!(replies.contains(&resp.response.as_str()));
        }
        assert!(agent.history().is_empty());
        assert_eq!(agent.stats().total(), 0);
    }

    #[tokio::test]
    async fn test_too_long_message_rejected() {
        let agent = offline_agent().with_max_input_chars(10);
        let resp = agent.process_message("tell me about the library hours").await;
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("limit is 10"));
        assert!(agent.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_appended_once_per_call() {
        let agent = offline_agent();
        agent.process_message("Hello!").await;
        agent.process_message("What's for lunch today?").await;
        let history = agent.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].intent, Intent::Conversation);
        assert_eq!(history[1].intent, Intent::Menus);
        assert!(history[1].is_campus_info);

        agent.clear_history();
        assert!(agent.history().is_empty());
    }

    #[tokio::test]
    async fn test_degraded_flag_and_stats() {
        let agent = offline_agent();
        let resp = agent.process_message("When is the next bus to downtown?").await;
        assert!(resp.success);
        assert!(resp.degraded);
        assert_eq!(agent.stats().fallback, 1);

        let resp = agent.process_message("thanks!").await;
        assert!(!resp.degraded);
        assert_eq!(agent.stats().total(), 1);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let resp = ProcessResponse {
            success: true,
            response: "hi".to_string(),
            intent: "conversation".to_string(),
            confidence: 0.9,
            is_campus_info_request: false,
            error: None,
            degraded: false,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["isCampusInfoRequest"], false);
        assert!(json.get("error").is_none());
    }
}
