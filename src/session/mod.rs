//! Per-user session state: which node of the dialog graph each chat is at.
//!
//! The store hands out one lockable cell per chat id. The controller holds
//! the cell's lock for the whole turn, so duplicate events for the same
//! chat are serialized while unrelated chats proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Session state for one chat: the name of the current node, or `None`
/// until the first turn has been played.
#[derive(Debug, Default)]
pub struct Session {
    pub current: Option<String>,
}

/// In-memory session store keyed by opaque chat id.
///
/// Sessions live for the process lifetime; there is no eviction or TTL.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<tokio::sync::Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Get the session cell for a chat, creating an empty one on first use.
    ///
    /// The inner map lock is held only for the lookup; callers lock the
    /// returned cell to read and advance the session.
    pub fn entry(&self, chat: &str) -> Arc<tokio::sync::Mutex<Session>> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions
            .entry(chat.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(Session::default())))
            .clone()
    }

    /// Snapshot of a chat's current node, for tests and logging. Returns
    /// `None` while a turn for that chat is in flight; never used on the
    /// turn path itself.
    pub fn current(&self, chat: &str) -> Option<String> {
        let cell = {
            let sessions = self.sessions.lock().unwrap();
            sessions.get(chat).cloned()
        }?;
        let session = cell.try_lock().ok()?;
        session.current.clone()
    }

    /// Number of chats seen so far.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_turn_has_no_session() {
        let store = SessionStore::new();
        let cell = store.entry("chat-1");
        assert!(cell.lock().await.current.is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_entry_returns_same_cell_per_chat() {
        let store = SessionStore::new();
        let a = store.entry("chat-1");
        a.lock().await.current = Some("begin".to_string());

        let b = store.entry("chat-1");
        assert_eq!(b.lock().await.current.as_deref(), Some("begin"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_chats_are_independent() {
        let store = SessionStore::new();
        store.entry("a").lock().await.current = Some("cats".to_string());
        store.entry("b").lock().await.current = Some("dogs".to_string());

        assert_eq!(store.entry("a").lock().await.current.as_deref(), Some("cats"));
        assert_eq!(store.entry("b").lock().await.current.as_deref(), Some("dogs"));
    }

    #[tokio::test]
    async fn test_same_chat_turns_are_serialized() {
        let store = Arc::new(SessionStore::new());

        // Two concurrent "turns" for one chat each read the state and write
        // it back incremented; serialization means no lost update.
        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let cell = store.entry("chat-1");
                let mut session = cell.lock().await;
                let n: u32 = session
                    .current
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                tokio::task::yield_now().await;
                session.current = Some((n + 1).to_string());
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let cell = store.entry("chat-1");
        assert_eq!(cell.lock().await.current.as_deref(), Some("2"));
    }
}
