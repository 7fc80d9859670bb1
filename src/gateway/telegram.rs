//! Thin Telegram Bot API shim: long-polls for updates, translates them
//! into engine events, and delivers presentations as messages. No dialog
//! logic lives here.

use crate::engine::types::{Button, ButtonAction, Event, Presentation};
use crate::engine::Dialog;
use crate::error::{Result, VocabotError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Buttons per inline-keyboard row
const KEYBOARD_ROW_WIDTH: usize = 2;

/// Telegram Bot API client implementing the `Gateway` seam.
pub struct TelegramGateway {
    client: Client,
    base: String,
    poll_timeout_secs: u64,
}

/// Envelope every Bot API method responds with
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
    callback_query: Option<CallbackQuery>,
}

#[derive(Deserialize)]
struct Message {
    chat: Chat,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Deserialize)]
struct CallbackQuery {
    id: String,
    data: Option<String>,
    message: Option<Message>,
}

impl TelegramGateway {
    /// Create a gateway for the given bot token.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// normal operation)
    pub fn new(api_base: &str, token: &str, poll_timeout_secs: u64) -> Self {
        // The request timeout must outlive the long-poll hold time.
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
            poll_timeout_secs,
        }
    }

    /// Call a Bot API method and return its `result` payload.
    async fn call<T: serde::de::DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let url = format!("{}/{}", self.base, method);

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(|e| VocabotError::Gateway(format!("{} request failed: {}", method, e)))?;

        let parsed: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| VocabotError::Gateway(format!("{} returned invalid JSON: {}", method, e)))?;

        if !parsed.ok {
            return Err(VocabotError::Gateway(format!(
                "{} rejected: {}",
                method,
                parsed.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        parsed
            .result
            .ok_or_else(|| VocabotError::Gateway(format!("{} returned ok without result", method)))
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": self.poll_timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    /// Acknowledge a callback query so the client stops showing a spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        let _: Value = self
            .call("answerCallbackQuery", json!({ "callback_query_id": callback_id }))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl crate::gateway::Gateway for TelegramGateway {
    async fn send(&self, chat: &str, presentation: Presentation) -> Result<()> {
        let markup = presentation.buttons.as_deref().map(keyboard);

        // A photo node travels as one message with the prompt as caption.
        let (method, mut params) = match &presentation.photo {
            Some(photo) => (
                "sendPhoto",
                json!({ "chat_id": chat, "photo": photo, "caption": presentation.text }),
            ),
            None => (
                "sendMessage",
                json!({ "chat_id": chat, "text": presentation.text }),
            ),
        };
        if let Some(markup) = markup {
            params["reply_markup"] = markup;
        }

        let _: Value = self.call(method, params).await?;
        Ok(())
    }

    async fn send_text(&self, chat: &str, text: &str) -> Result<()> {
        let _: Value = self
            .call("sendMessage", json!({ "chat_id": chat, "text": text }))
            .await?;
        Ok(())
    }

    async fn typing(&self, chat: &str) -> Result<()> {
        let _: bool = self
            .call("sendChatAction", json!({ "chat_id": chat, "action": "typing" }))
            .await?;
        Ok(())
    }
}

/// Build a Telegram inline keyboard from engine buttons, two per row.
/// Link buttons open externally and never come back as events; action
/// buttons carry their answer ordinal as the callback payload.
fn keyboard(buttons: &[Button]) -> Value {
    let rendered: Vec<Value> = buttons
        .iter()
        .map(|b| match &b.action {
            ButtonAction::Goto(i) => json!({ "text": b.label, "callback_data": i.to_string() }),
            ButtonAction::OpenLink(url) => json!({ "text": b.label, "url": url }),
        })
        .collect();

    let rows: Vec<Value> = rendered
        .chunks(KEYBOARD_ROW_WIDTH)
        .map(|row| Value::Array(row.to_vec()))
        .collect();

    json!({ "inline_keyboard": rows })
}

/// Translate a Telegram update into an engine event, if it carries one.
fn event_from_update(update: &Update) -> Option<Event> {
    if let Some(message) = &update.message {
        let text = message.text.as_deref()?;
        return Some(Event::text(message.chat.id.to_string(), text));
    }

    if let Some(callback) = &update.callback_query {
        let chat = &callback.message.as_ref()?.chat;
        let payload = callback.data.as_deref()?;
        return Some(Event::button(chat.id.to_string(), payload));
    }

    None
}

/// Routes events to one worker task per chat. A chat's events are handled
/// strictly in arrival order because its worker awaits each turn before
/// taking the next queued event; different chats run concurrently.
/// Workers live for the process lifetime, like the sessions they feed.
struct EventDispatcher {
    dialog: Arc<Dialog>,
    senders: HashMap<String, mpsc::UnboundedSender<Event>>,
}

impl EventDispatcher {
    fn new(dialog: Arc<Dialog>) -> Self {
        Self {
            dialog,
            senders: HashMap::new(),
        }
    }

    fn dispatch(&mut self, event: Event) {
        let sender = self.senders.entry(event.chat.clone()).or_insert_with(|| {
            let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
            let dialog = self.dialog.clone();
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    dialog.handle(event).await;
                }
            });
            tx
        });

        if sender.send(event).is_err() {
            log::error!("Event worker is gone; dropping event");
        }
    }
}

/// Long-poll loop: fetch updates and hand each event to its chat's
/// worker, preserving per-chat arrival order.
pub async fn run(dialog: Arc<Dialog>, gateway: Arc<TelegramGateway>) -> Result<()> {
    log::info!("Long-polling for updates");
    let mut dispatcher = EventDispatcher::new(dialog);
    let mut offset: i64 = 0;

    loop {
        let updates = match gateway.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                log::error!("getUpdates failed: {}; retrying", e);
                tokio::time::sleep(Duration::from_secs(3)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            if let Some(callback) = &update.callback_query {
                let gateway = gateway.clone();
                let callback_id = callback.id.clone();
                tokio::spawn(async move {
                    if let Err(e) = gateway.answer_callback(&callback_id).await {
                        log::debug!("answerCallbackQuery failed: {}", e);
                    }
                });
            }

            match event_from_update(&update) {
                Some(event) => dispatcher.dispatch(event),
                None => log::debug!("Ignoring update {} with no usable event", update.update_id),
            }
        }
    }
}
