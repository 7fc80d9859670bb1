/// Inbound user event, already translated by the gateway.
#[derive(Debug, Clone)]
pub struct Event {
    /// Opaque chat/user identifier, stable per conversation
    pub chat: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub enum EventKind {
    /// Free-text message
    Text(String),
    /// Button press; the payload is the callback string the gateway got
    /// back, expected to be the decimal ordinal of the pressed answer
    Button(String),
}

impl Event {
    pub fn text(chat: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat: chat.into(),
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn button(chat: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            chat: chat.into(),
            kind: EventKind::Button(payload.into()),
        }
    }
}

/// Rendered node, ready for the gateway to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub text: String,
    /// Image reference; when present the text travels as its caption
    pub photo: Option<String>,
    /// Button rows for variant nodes; `None` for plain nodes
    pub buttons: Option<Vec<Button>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Pressing it yields a `Button` event carrying this answer ordinal
    Goto(usize),
    /// Direct link: opens externally, never produces an event
    OpenLink(String),
}
