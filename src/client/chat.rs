use tracing::{debug, warn};

use super::log::{MessageLog, UiMessage};
use super::send_fsm::{SendEvent, SendFlow, SendState};
use super::transport::MessageTransport;
use crate::error::Result;

pub const PLACEHOLDER_TEXT: &str = "Nova is thinking...";
pub const ERROR_BUBBLE_TEXT: &str = "⚠️ Something went wrong. Please try again later.";

/// Millisecond timestamps, bumped when two ids land in the same millisecond.
#[derive(Debug, Default)]
struct IdSource {
    last: i64,
}

impl IdSource {
    fn next(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

/// A send that has been rendered but not answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub placeholder_id: i64,
    pub text: String,
}

#[derive(Default)]
pub struct ChatClient {
    messages: MessageLog,
    input: String,
    flow: SendFlow,
    ids: IdSource,
}

impl ChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_sending(&self) -> bool {
        self.flow.state() == SendState::AwaitingReply
    }

    /// Renders the user bubble and the placeholder, clears the input and
    /// marks a send in flight. `None` when the input is blank or a send is
    /// already outstanding.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let text = crate::canned::trim_phrase(&self.input);
        if text.is_empty() || self.is_sending() {
            return None;
        }
        let text = text.to_string();
        if !self.flow.apply(SendEvent::Send) {
            return None;
        }
        self.input.clear();

        let user_id = self.ids.next();
        let placeholder_id = self.ids.next();
        self.messages.push(UiMessage::user(user_id, text.clone()));
        self.messages
            .push(UiMessage::placeholder(placeholder_id, PLACEHOLDER_TEXT));

        Some(PendingSend {
            placeholder_id,
            text,
        })
    }

    /// Settles `pending`. On success every placeholder in the log becomes
    /// the reply and keeps its id, including ones left behind by earlier
    /// failed sends. On failure the placeholder stays and an error bubble is
    /// appended after it.
    pub fn complete(&mut self, pending: PendingSend, result: Result<String>) {
        match result {
            Ok(reply) => {
                self.flow.apply(SendEvent::Reply);
                let replaced = self.messages.replace_placeholders(&reply);
                if replaced == 0 {
                    warn!(
                        placeholder_id = pending.placeholder_id,
                        "Placeholder missing; appending reply"
                    );
                    self.messages
                        .push(UiMessage::bot(pending.placeholder_id, reply));
                } else if replaced > 1 {
                    debug!(replaced, "Settled stale placeholders with the reply");
                }
            }
            Err(err) => {
                self.flow.apply(SendEvent::Fail);
                warn!("Error sending message: {err}");
                let id = self.ids.next();
                self.messages.push(UiMessage::bot(id, ERROR_BUBBLE_TEXT));
            }
        }
    }

    /// Full send cycle against `transport`. Returns false when the send was
    /// ignored.
    pub async fn send<T>(&mut self, transport: &T) -> bool
    where
        T: MessageTransport + ?Sized,
    {
        let Some(pending) = self.begin_send() else {
            debug!("Ignoring send: blank input or reply pending");
            return false;
        };
        let result = transport.post_message(&pending.text).await;
        self.complete(pending, result);
        true
    }
}
