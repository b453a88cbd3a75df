//! Conversation sessions.
//!
//! Each session keeps an append-only, bounded history of turns (oldest
//! evicted first). The store is owned by the caller and injected into the
//! agent, so several agents can share one store keyed by session id. The
//! store also caps how many sessions it holds, dropping the least recently
//! used one. Nothing here is persisted.

use crate::intent::Intent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use lru::LruCache;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Raw user text with its arrival time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One completed exchange. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub user_text: String,
    pub intent: Intent,
    pub is_campus_info: bool,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded ring buffer of turns
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl ConversationHistory {
    /// A capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.back()
    }

    /// Oldest first
    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }
}

/// Session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory store of per-session histories
#[derive(Debug)]
pub struct SessionStore {
    capacity: usize,
    sessions: Mutex<LruCache<SessionId, ConversationHistory>>,
}

impl SessionStore {
    /// `capacity` turns per session, up to `DEFAULT_MAX_SESSIONS` sessions
    pub fn new(capacity: usize) -> Self {
        Self::with_max_sessions(capacity, crate::DEFAULT_MAX_SESSIONS)
    }

    pub fn with_max_sessions(capacity: usize, max_sessions: usize) -> Self {
        let max = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            capacity,
            sessions: Mutex::new(LruCache::new(max)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<SessionId, ConversationHistory>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a turn to a session, creating the session on first use.
    /// A new session past the cap evicts the least recently used one.
    pub fn append(&self, id: SessionId, turn: ConversationTurn) {
        let mut sessions = self.lock();
        if let Some(history) = sessions.get_mut(&id) {
            history.push(turn);
            return;
        }
        let mut history = ConversationHistory::new(self.capacity);
        history.push(turn);
        if let Some((evicted, _)) = sessions.push(id, history) {
            debug!(session = %evicted, "session evicted");
        }
    }

    /// Snapshot of a session's turns, oldest first
    pub fn history(&self, id: SessionId) -> Vec<ConversationTurn> {
        self.lock().get(&id).map(|h| h.turns()).unwrap_or_default()
    }

    /// Drop a session's history
    pub fn clear(&self, id: SessionId) -> bool {
        self.lock().pop(&id).is_some()
    }

    pub fn max_sessions(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn session_count(&self) -> usize {
        self.lock().len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(crate::DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(text: &str) -> ConversationTurn {
        ConversationTurn {
            user_text: text.to_string(),
            intent: Intent::Conversation,
            is_campus_info: false,
            response: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut h = ConversationHistory::new(2);
        h.push(turn("one"));
        h.push(turn("two"));
        h.push(turn("three"));
        let texts: Vec<String> = h.turns().into_iter().map(|t| t.user_text).collect();
        assert_eq!(texts, vec!["two", "three"]);
        assert_eq!(h.last().unwrap().user_text, "three");
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut h = ConversationHistory::new(0);
        h.push(turn("a"));
        h.push(turn("b"));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_store_isolates_sessions() {
        let store = SessionStore::new(10);
        let a = SessionId::new();
        let b = SessionId::new();
        store.append(a, turn("hi from a"));
        store.append(b, turn("hi from b"));
        store.append(a, turn("again a"));
        assert_eq!(store.history(a).len(), 2);
        assert_eq!(store.history(b).len(), 1);
        assert_eq!(store.session_count(), 2);

        assert!(store.clear(a));
        assert!(store.history(a).is_empty());
        assert!(!store.clear(a));
    }

    #[test]
    fn test_store_evicts_least_recent_session() {
        let store = SessionStore::with_max_sessions(10, 2);
        let (a, b, c) = (SessionId::new(), SessionId::new(), SessionId::new());
        store.append(a, turn("a1"));
        store.append(b, turn("b1"));
        // Touch a so b becomes the oldest
        store.append(a, turn("a2"));
        store.append(c, turn("c1"));

        assert_eq!(store.session_count(), 2);
        assert_eq!(store.history(a).len(), 2);
        assert!(store.history(b).is_empty());
        assert_eq!(store.history(c).len(), 1);
    }

    #[test]
    fn test_zero_session_cap_holds_one() {
        let store = SessionStore::with_max_sessions(10, 0);
        assert_eq!(store.max_sessions(), 1);
        store.append(SessionId::new(), turn("x"));
        store.append(SessionId::new(), turn("y"));
        assert_eq!(store.session_count(), 1);
    }
}
