use serde::Serialize;

use crate::domains::chat::Sender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiMessage {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub temp: bool,
}

impl UiMessage {
    pub fn user(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            temp: false,
        }
    }

    pub fn bot(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            temp: false,
        }
    }

    pub fn placeholder(id: i64, text: impl Into<String>) -> Self {
        Self {
            temp: true,
            ..Self::bot(id, text)
        }
    }
}

/// Ordered bubble list. Positions are stable across `replace`.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<UiMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: UiMessage) {
        self.messages.push(message);
    }

    /// Swaps the entry with `id` for `message` in place. Returns the old entry.
    pub fn replace(&mut self, id: i64, message: UiMessage) -> Option<UiMessage> {
        let slot = self.messages.iter_mut().find(|m| m.id == id)?;
        Some(std::mem::replace(slot, message))
    }

    /// Turns every placeholder into a settled bot bubble carrying `text`,
    /// keeping each one's id and position. Returns how many were replaced.
    pub fn replace_placeholders(&mut self, text: &str) -> usize {
        let mut replaced = 0;
        for slot in self.messages.iter_mut().filter(|m| m.temp) {
            *slot = UiMessage::bot(slot.id, text);
            replaced += 1;
        }
        replaced
    }

    pub fn remove(&mut self, id: i64) -> Option<UiMessage> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }

    pub fn get(&self, id: i64) -> Option<&UiMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &UiMessage> {
        self.messages.iter().filter(|m| m.temp)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UiMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&UiMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a UiMessage;
    type IntoIter = std::slice::Iter<'a, UiMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
