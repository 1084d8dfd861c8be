use async_trait::async_trait;

use crate::domains::chat::{ChatTurn, NewChatTurn};
use crate::error::Result;

/// What a successful generation call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Plain text taken from the first candidate.
    Candidate(String),
    /// The call succeeded but no usable text could be extracted.
    NoCandidate,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;

    /// Sends `text` as a single user-role message.
    async fn generate(&self, text: &str) -> Result<Generation>;
}

#[async_trait]
pub trait TurnStore: Send + Sync {
    async fn create(&self, turn: NewChatTurn) -> Result<ChatTurn>;

    /// The most recent `limit` turns, oldest first.
    async fn recent(&self, limit: usize) -> Result<Vec<ChatTurn>>;
}
