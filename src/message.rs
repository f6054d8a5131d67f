//! Chat message records as delivered by the host log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alias reserved for narrated scene descriptions. Messages spoken under this
/// alias never group and never re-render.
pub const DESCRIPTION_ALIAS: &str = "#DESCRIPTION";

/// Kind of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    /// Table talk outside the fiction.
    Ooc,
    /// Spoken by a character.
    InCharacter,
    Emote,
    /// Private message to a set of recipients.
    Whisper,
    /// Dice roll result.
    Roll,
    Other,
}

/// Who a message is spoken as: a placed token, an actor, or a bare alias.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub token: Option<String>,
    pub actor: Option<String>,
    pub alias: Option<String>,
}

impl Speaker {
    /// True when the alias is the reserved description sentinel.
    pub fn is_description(&self) -> bool {
        self.alias.as_deref() == Some(DESCRIPTION_ALIAS)
    }
}

/// Display form of whisper recipients as the host resolved them. Hosts deliver
/// either one pre-joined name string or a list of names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhisperTo {
    Name(String),
    Names(Vec<String>),
}

/// A single entry in the host's append-only chat log.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    /// Author user id.
    pub user: String,
    pub kind: MessageKind,
    #[serde(default)]
    pub speaker: Speaker,
    /// Recipient user ids, in host order. `None` means the attribute is
    /// missing entirely, which is distinct from an empty (public) set.
    pub whisper: Option<Vec<String>>,
    /// Recipient display names, when the host supplies them.
    #[serde(default)]
    pub whisper_to: Option<WhisperTo>,
    pub visible: bool,
    /// Explicit override: never treat this message as a continuation.
    #[serde(default)]
    pub force_leading: bool,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

impl ChatMessage {
    /// A visible public message with an empty recipient set.
    pub fn new(
        id: impl Into<String>,
        user: impl Into<String>,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            kind,
            speaker: Speaker::default(),
            whisper: Some(Vec::new()),
            whisper_to: None,
            visible: true,
            force_leading: false,
            timestamp: Utc::now(),
            content: content.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.speaker.alias = Some(alias.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.speaker.token = Some(token.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.speaker.actor = Some(actor.into());
        self
    }

    pub fn with_whisper(mut self, recipients: Vec<String>) -> Self {
        self.whisper = Some(recipients);
        self
    }

    pub fn with_whisper_to(mut self, whisper_to: WhisperTo) -> Self {
        self.whisper_to = Some(whisper_to);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_force_leading(mut self) -> Self {
        self.force_leading = true;
        self
    }
}
