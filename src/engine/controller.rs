//! Dialog controller: orchestrates one turn per inbound event and owns the
//! error-recovery policy. All internal failures stop here; the user only
//! ever sees a wrong-answer phrase or the default node's prompt.

use crate::engine::types::Event;
use crate::engine::{matcher, renderer};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::morph::Normalizer;
use crate::session::{Session, SessionStore};
use crate::voc::{Node, Vocabulary};
use std::sync::Arc;

pub struct Dialog {
    voc: Arc<Vocabulary>,
    sessions: SessionStore,
    gateway: Arc<dyn Gateway>,
    normalizer: Arc<dyn Normalizer>,
}

impl Dialog {
    pub fn new(
        voc: Arc<Vocabulary>,
        gateway: Arc<dyn Gateway>,
        normalizer: Arc<dyn Normalizer>,
    ) -> Self {
        Self {
            voc,
            sessions: SessionStore::new(),
            gateway,
            normalizer,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one inbound event.
    ///
    /// The chat's session lock is held for the whole turn, including the
    /// typing indicator, so concurrent events for one chat are serialized
    /// and apply in lock-acquisition order while other chats proceed
    /// concurrently (the transport additionally dispatches same-chat
    /// events sequentially, so that order is arrival order). A turn
    /// either commits (session advanced after a successful send) or falls
    /// back to the default node; there is no partial state in between.
    pub async fn handle(&self, event: Event) {
        let cell = self.sessions.entry(&event.chat);
        let mut session = cell.lock().await;

        if let Err(e) = self.gateway.typing(&event.chat).await {
            log::debug!("Typing indicator failed for chat {}: {}", event.chat, e);
        }

        // First contact: play the entry node, no matching.
        let Some(current) = session.current.clone() else {
            if let Err(e) = self
                .play_node(&event.chat, self.voc.default_node(), &mut session)
                .await
            {
                log::error!("Entry node failed for chat {}: {}", event.chat, e);
            }
            return;
        };

        if let Err(e) = self.turn(&event, &current, &mut session).await {
            // Hard reset on any internal failure: unknown node, missing
            // prompt, gateway send error, normalizer error. The error is
            // logged, never shown to the user.
            log::error!(
                "Turn failed for chat {} at node '{}': {}; resetting to '{}'",
                event.chat,
                current,
                e,
                self.voc.default_node()
            );
            if let Err(e) = self
                .play_node(&event.chat, self.voc.default_node(), &mut session)
                .await
            {
                log::error!("Reset to default node failed for chat {}: {}", event.chat, e);
            }
        }
    }

    async fn turn(&self, event: &Event, current: &str, session: &mut Session) -> Result<()> {
        let node = self.voc.node(current)?;

        match matcher::match_event(node, &event.kind, self.normalizer.as_ref()).await? {
            // NoMatch is normal control flow: re-prompt, keep the session
            // where it is.
            None => self.play_wrong(&event.chat, current, node).await,
            Some(next) => self.play_node(&event.chat, &next, session).await,
        }
    }

    /// Render a node, deliver it, then commit the session. The commit only
    /// happens after a successful send, so a delivery failure never leaves
    /// the session pointing at a node the user never saw.
    async fn play_node(&self, chat: &str, node_name: &str, session: &mut Session) -> Result<()> {
        let node = self.voc.node(node_name)?;
        let presentation = renderer::render(node_name, node)?;
        self.gateway.send(chat, presentation).await?;

        session.current = Some(node_name.to_string());
        log::debug!("Chat {} is now at node '{}'", chat, node_name);
        Ok(())
    }

    /// Send the node's wrong-answer phrase, falling back to the
    /// vocabulary-wide one. With neither configured the bot stays silent;
    /// that is a vocabulary gap worth a warning, not a failed turn.
    async fn play_wrong(&self, chat: &str, node_name: &str, node: &Node) -> Result<()> {
        let phrase = node.wrong.as_deref().or(self.voc.global_wrong_phrase());

        match phrase {
            Some(phrase) => self.gateway.send_text(chat, phrase).await,
            None => {
                log::warn!(
                    "Node '{}' has no wrong phrase and no global fallback exists; staying silent for chat {}",
                    node_name,
                    chat
                );
                Ok(())
            }
        }
    }
}
