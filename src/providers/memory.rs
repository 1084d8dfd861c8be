use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domains::chat::{ChatTurn, NewChatTurn};
use crate::error::Result;
use crate::interfaces::providers::TurnStore;

/// Process-local turn log, used by `--ephemeral` runs and tests.
#[derive(Default)]
pub struct InMemoryTurnStore {
    turns: Mutex<Vec<ChatTurn>>,
}

impl InMemoryTurnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<ChatTurn> {
        self.turns.lock().await.clone()
    }
}

#[async_trait]
impl TurnStore for InMemoryTurnStore {
    async fn create(&self, turn: NewChatTurn) -> Result<ChatTurn> {
        let mut turns = self.turns.lock().await;
        let stored = ChatTurn {
            id: turns.len() as i64 + 1,
            sender: turn.sender,
            text: turn.text,
            created_at: chrono::Utc::now().timestamp(),
        };
        turns.push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ChatTurn>> {
        let turns = self.turns.lock().await;
        let start = turns.len().saturating_sub(limit);
        Ok(turns[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::chat::Sender;

    #[tokio::test]
    async fn appends_in_order_and_limits_recent() {
        let store = InMemoryTurnStore::new();
        store.create(NewChatTurn::user("one")).await.unwrap();
        store.create(NewChatTurn::bot("two")).await.unwrap();
        let third = store.create(NewChatTurn::user("three")).await.unwrap();
        assert_eq!(third.id, 3);

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].text, "two");
        assert_eq!(recent[0].sender, Sender::Bot);
        assert_eq!(recent[1].text, "three");
        assert_eq!(store.recent(10).await.unwrap().len(), 3);
    }
}
