use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::ChatError;

pub const TYPING_TEXT: &str = "NAZBOT está pensando...";
pub const CONTACT_TIP: &str = "Tip: Puedes escribir tu email directamente aquí.";
pub const GALACTIC_ERROR: &str = "Lo siento, ha habido un error galáctico. Inténtalo de nuevo en unos segundos.";
pub const CONNECTION_ERROR: &str = "No puedo conectar con el servidor central ahora mismo. Revisa tu conexión.";

const CONTACT_TRIGGERS: [&str; 3] = ["email", "teléfono", "contacto"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Bot,
    Error,
    Tip,
    Typing,
}

impl BubbleKind {
    pub fn class(self) -> &'static str {
        match self {
            BubbleKind::User => "message user",
            BubbleKind::Bot => "message bot",
            BubbleKind::Error => "message bot error",
            BubbleKind::Tip => "typing tip",
            BubbleKind::Typing => "typing",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub id: u64,
    pub kind: BubbleKind,
    pub text: String,
}

impl Bubble {
    /// Text split on newlines, rendered with a line break between lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// A send in flight: the history snapshot to post and the typing bubble to clear.
#[derive(Debug, PartialEq)]
pub struct PendingSend {
    pub typing_id: u64,
    pub history: Vec<ChatMessage>,
}

/// The text field the visitor types into.
pub trait Composer {
    fn clear(&self);
}

/// Conversation state of the chat widget.
///
/// The history only ever gains an assistant turn from a well-formed reply,
/// so a failed exchange leaves just the user's message behind.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    bubbles: Vec<Bubble>,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    #[cfg(test)]
    pub fn count(&self, kind: BubbleKind) -> usize {
        self.bubbles.iter().filter(|b| b.kind == kind).count()
    }

    /// Starts a send. Blank input is ignored.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(BubbleKind::User, text);
        let typing_id = self.push(BubbleKind::Typing, TYPING_TEXT);
        self.history.push(ChatMessage::user(text));
        Some(PendingSend {
            typing_id,
            history: self.history.clone(),
        })
    }

    /// Sends from the composer or a suggestion chip. Any draft is discarded once
    /// the send is accepted.
    pub fn send_from(&mut self, text: &str, composer: &impl Composer) -> Option<PendingSend> {
        let pending = self.begin_send(text)?;
        composer.clear();
        Some(pending)
    }

    pub fn complete(&mut self, pending: PendingSend, outcome: Result<Value, ChatError>) {
        self.bubbles.retain(|b| b.id != pending.typing_id);
        match outcome {
            Ok(body) => match extract_reply(&body) {
                Some(reply) => {
                    self.push(BubbleKind::Bot, &reply);
                    if wants_contact_tip(&reply) {
                        self.push(BubbleKind::Tip, CONTACT_TIP);
                    }
                    self.history.push(ChatMessage::assistant(reply));
                }
                None => {
                    log::warn!("chat reply without choices: {}", body);
                    self.push(BubbleKind::Error, GALACTIC_ERROR);
                }
            },
            Err(e) => {
                log::warn!("chat request failed: {}", e);
                self.push(BubbleKind::Error, CONNECTION_ERROR);
            }
        }
    }

    fn push(&mut self, kind: BubbleKind, text: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.bubbles.push(Bubble {
            id,
            kind,
            text: text.to_string(),
        });
        id
    }
}

/// `choices[0].message.content` of a chat-completion payload.
pub fn extract_reply(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

pub fn wants_contact_tip(reply: &str) -> bool {
    let lower = reply.to_lowercase();
    CONTACT_TRIGGERS.iter().any(|t| lower.contains(t))
}
