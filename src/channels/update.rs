//! Inbound Telegram updates, narrowed to the event shapes the bot reacts to.
//!
//! Telegram posts one `Update` object per webhook call. Anything that is not
//! a text message or a button callback becomes [`InboundEvent::Unrecognized`].

use serde::Deserialize;

/// One inbound event, validated at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A plain text message.
    Text {
        chat_id: String,
        user_id: String,
        text: String,
    },
    /// A click on an inline keyboard button; `data` is the button label.
    Button {
        chat_id: String,
        user_id: String,
        data: String,
    },
    /// Any other update shape.
    Unrecognized,
}

impl InboundEvent {
    /// Narrow a raw update. Callback queries win when both keys are present.
    pub fn from_update(update: serde_json::Value) -> Self {
        let raw: RawUpdate = match serde_json::from_value(update) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "Update does not match a known shape");
                return Self::Unrecognized;
            }
        };

        if let Some(query) = raw.callback_query {
            return match (query.message, query.data) {
                (Some(message), Some(data)) => Self::Button {
                    chat_id: message.chat.id.into_string(),
                    user_id: query.from.id.into_string(),
                    data,
                },
                _ => Self::Unrecognized,
            };
        }

        if let Some(message) = raw.message {
            return match (message.from, message.text) {
                (Some(from), Some(text)) => Self::Text {
                    chat_id: message.chat.id.into_string(),
                    user_id: from.id.into_string(),
                    text,
                },
                _ => Self::Unrecognized,
            };
        }

        Self::Unrecognized
    }

    /// Platform user id, when the event carries one.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Text { user_id, .. } | Self::Button { user_id, .. } => Some(user_id),
            Self::Unrecognized => None,
        }
    }
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawUpdate {
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    callback_query: Option<RawCallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    chat: RawChat,
    #[serde(default)]
    from: Option<RawUser>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCallbackQuery {
    from: RawUser,
    #[serde(default)]
    message: Option<RawCallbackMessage>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCallbackMessage {
    chat: RawChat,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: RawId,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: RawId,
}

/// Telegram sends integer ids; tests and proxies sometimes send strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Int(id) => id.to_string(),
            Self::Str(id) => id,
        }
    }
}
