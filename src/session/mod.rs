// src/session/mod.rs
//! In-memory session context tracker.
//!
//! One `Session` per caller-supplied key: creation time, turn history,
//! inferred emotional state and accumulated topic tags. Sessions live only
//! for the process lifetime and are removed by the background sweeper once
//! idle past the configured threshold.
//!
//! The store is constructor-injected and coarsely locked. The lock is only
//! held for the in-memory mutation itself; prompt composition and every
//! vendor call happen against a cloned snapshot, outside the lock.

pub mod sweeper;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::classifier::{self, EmotionalState};

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One conversation turn, insertion order significant.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Server-side conversation context for one session key.
#[derive(Debug, Clone)]
pub struct Session {
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub history: Vec<Turn>,
    /// Reflects the most recently *matched* message; unmatched input
    /// leaves the previous state in place.
    pub emotional_state: EmotionalState,
    /// Monotonically non-decreasing for the life of the session.
    pub topics: BTreeSet<&'static str>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            last_activity_at: now,
            history: Vec::new(),
            emotional_state: EmotionalState::Unknown,
            topics: BTreeSet::new(),
        }
    }
}

/// Immutable view of a session handed to the prompt composer, so composition
/// and downstream calls run without touching the store lock.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub emotional_state: EmotionalState,
    pub topics: BTreeSet<&'static str>,
    /// Most recent turns, oldest first, bounded by the store's window.
    pub recent: Vec<Turn>,
    /// Whole minutes since the session was created.
    pub elapsed_minutes: i64,
}

/// Coarsely-locked map of live sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    idle_threshold: chrono::Duration,
    history_window: usize,
}

impl SessionStore {
    pub fn new(idle_threshold: chrono::Duration, history_window: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_threshold,
            history_window,
        }
    }

    /// Record an inbound user message and return a snapshot for prompt
    /// composition.
    ///
    /// An unknown session id creates a fresh session, never an error. The
    /// classifier runs inside the lock (it is pure and cheap); emotion is
    /// last-match-wins with the prior state preserved when nothing matches,
    /// and matched topics are unioned into the accumulated set. Empty or
    /// whitespace-only text records no turn, changes no state, and does not
    /// create a session for an unknown key.
    pub async fn record_user_message(
        &self,
        session_id: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> SessionSnapshot {
        let trimmed = text.trim();
        let mut sessions = self.sessions.write().await;

        if trimmed.is_empty() {
            return match sessions.get(session_id) {
                Some(session) => self.snapshot_of(session, now),
                None => SessionSnapshot {
                    emotional_state: EmotionalState::Unknown,
                    topics: BTreeSet::new(),
                    recent: Vec::new(),
                    elapsed_minutes: 0,
                },
            };
        }

        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(now));

        let classification = classifier::classify(trimmed, session.emotional_state);
        session.emotional_state = classification.emotional_state;
        session.topics.extend(classification.topics);
        session.history.push(Turn {
            role: Role::User,
            text: trimmed.to_string(),
            timestamp: now,
        });
        session.last_activity_at = now;

        self.snapshot_of(session, now)
    }

    /// Append the assistant's reply. If the session was swept (or the caller
    /// aborted and re-sent under a new id) the session is recreated; the
    /// turn is recorded regardless — last write wins.
    pub async fn record_assistant_reply(
        &self,
        session_id: &str,
        text: &str,
        now: DateTime<Utc>,
    ) {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(now));

        session.history.push(Turn {
            role: Role::Assistant,
            text: text.to_string(),
            timestamp: now,
        });
        session.last_activity_at = now;
    }

    /// Most recent turns for a session, oldest first. Unknown sessions yield
    /// an empty list.
    pub async fn history(&self, session_id: &str, limit: usize) -> Vec<Turn> {
        let sessions = self.sessions.read().await;
        match sessions.get(session_id) {
            Some(session) => {
                let start = session.history.len().saturating_sub(limit);
                session.history[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Current snapshot without recording anything, if the session exists.
    pub async fn snapshot(&self, session_id: &str, now: DateTime<Utc>) -> Option<SessionSnapshot> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).map(|s| self.snapshot_of(s, now))
    }

    /// Remove every session idle past the threshold. Idempotent; an empty
    /// store is a no-op. Returns the number of sessions removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.idle_threshold;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_activity_at >= cutoff);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn snapshot_of(&self, session: &Session, now: DateTime<Utc>) -> SessionSnapshot {
        let start = session.history.len().saturating_sub(self.history_window);
        SessionSnapshot {
            emotional_state: session.emotional_state,
            topics: session.topics.clone(),
            recent: session.history[start..].to_vec(),
            elapsed_minutes: (now - session.created_at).num_minutes(),
        }
    }
}

/// Generates a new random session ID (UUID v4)
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}
