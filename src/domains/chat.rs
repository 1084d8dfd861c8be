use serde::{Deserialize, Serialize};

use crate::error::{NovaBotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(NovaBotError::Database(format!(
                "unknown sender in chat_turns: {other}"
            ))),
        }
    }
}

/// A turn that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatTurn {
    pub sender: Sender,
    pub text: String,
}

impl NewChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// A stored turn as echoed back by a [`TurnStore`](crate::interfaces::providers::TurnStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: i64,
    pub sender: Sender,
    pub text: String,
    pub created_at: i64,
}
