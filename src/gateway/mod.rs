//! Messaging gateway seam. The engine only ever talks to this trait; the
//! Telegram transport behind it is a thin shim with no dialog logic.

pub mod telegram;

pub use telegram::TelegramGateway;

use crate::engine::types::Presentation;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Deliver a rendered node: prompt text, optional photo (text becomes
    /// its caption), optional button set.
    async fn send(&self, chat: &str, presentation: Presentation) -> Result<()>;

    /// Deliver a bare service message, e.g. the wrong-answer phrase.
    async fn send_text(&self, chat: &str, text: &str) -> Result<()>;

    /// "Bot is typing..." indicator. Best-effort: the controller logs a
    /// failure and carries on with the turn.
    async fn typing(&self, chat: &str) -> Result<()>;
}
