//! Per-session conversation storage

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use super::conversation::Conversation;

/// Caller-supplied conversation key
pub type SessionId = Uuid;

/// Session used when the caller does not name one
pub const DEFAULT_SESSION: SessionId = Uuid::nil();

/// Shared handle to one conversation
pub type SessionHandle = Arc<AsyncMutex<Conversation>>;

/// In-memory map of conversations, created on first use
///
/// The map lock is only held for lookups. Each conversation has its own
/// async lock, held for a whole turn so turns of one session never interleave.
/// Sessions without turns are dropped again through `release`, so only
/// conversations with committed history stay in the map.
pub struct SessionStore {
    system_prompt: String,
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// The session's conversation, created if missing
    pub fn session(&self, id: SessionId) -> SessionHandle {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions
            .entry(id)
            .or_insert_with(|| {
                tracing::debug!(session = %id, "opening conversation");
                Arc::new(AsyncMutex::new(Conversation::new(self.system_prompt.clone())))
            })
            .clone()
    }

    /// The session's conversation if it was ever used
    pub fn existing(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
    }

    /// Drop the session if it holds no turns and no caller has a handle to it
    ///
    /// Handles are only cloned under the map lock, so a count of one means a
    /// waiting turn cannot be cut off.
    pub fn release(&self, id: SessionId) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let idle = sessions.get(&id).is_some_and(|handle| {
            Arc::strong_count(handle) == 1
                && handle
                    .try_lock()
                    .map(|conversation| conversation.is_empty())
                    .unwrap_or(false)
        });
        if idle {
            sessions.remove(&id);
            tracing::debug!(session = %id, "closing conversation");
        }
    }

    /// Number of open sessions
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
