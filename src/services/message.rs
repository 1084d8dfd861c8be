use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::canned::CannedReplies;
use crate::domains::chat::{ChatTurn, NewChatTurn};
use crate::error::{NovaBotError, Result};
use crate::interfaces::providers::{Generation, TextGenerator, TurnStore};

pub const EMPTY_TEXT_ERROR: &str = "Text cannot be empty";
pub const UNCERTAIN_REPLY: &str = "Hmm, I’m not sure about that!";
pub const FALLBACK_REPLY: &str = "Sorry, I couldn’t process that right now. Try again later!";

/// Result of asking the generator, failure included.
#[derive(Debug)]
pub enum GenerationOutcome {
    Candidate(String),
    NoCandidate,
    Failed(NovaBotError),
}

impl From<Result<Generation>> for GenerationOutcome {
    fn from(result: Result<Generation>) -> Self {
        match result {
            Ok(Generation::Candidate(text)) => Self::Candidate(text),
            Ok(Generation::NoCandidate) => Self::NoCandidate,
            Err(err) => Self::Failed(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Canned,
    Generated,
    Uncertain,
    Fallback,
}

impl ReplySource {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplySource::Canned => "canned",
            ReplySource::Generated => "generated",
            ReplySource::Uncertain => "uncertain",
            ReplySource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageExchange {
    pub user_message: String,
    pub bot_message: String,
    pub source: ReplySource,
}

pub struct MessageHandler {
    replies: Arc<CannedReplies>,
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn TurnStore>,
}

impl MessageHandler {
    pub fn new(
        replies: Arc<CannedReplies>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn TurnStore>,
    ) -> Self {
        Self {
            replies,
            generator,
            store,
        }
    }

    /// Validates, stores the user turn, picks a reply, stores the bot turn.
    ///
    /// Only [`NovaBotError::Validation`] is the caller's fault. Generation
    /// failures never surface here; they degrade to [`FALLBACK_REPLY`].
    pub async fn handle(&self, text: Option<&str>) -> Result<MessageExchange> {
        let text = match text {
            Some(text) if !crate::canned::trim_phrase(text).is_empty() => text,
            _ => return Err(NovaBotError::Validation(EMPTY_TEXT_ERROR.to_string())),
        };

        let user_turn = self.store.create(NewChatTurn::user(text)).await?;

        let (reply, source) = match self.replies.lookup(text) {
            Some(canned) => (canned.to_string(), ReplySource::Canned),
            None => self.generate_reply(text).await,
        };

        let bot_turn = self.store.create(NewChatTurn::bot(reply)).await?;
        info!(
            reply_source = source.as_str(),
            user_turn_id = user_turn.id,
            bot_turn_id = bot_turn.id,
            "Handled message"
        );

        Ok(MessageExchange {
            user_message: user_turn.text,
            bot_message: bot_turn.text,
            source,
        })
    }

    pub async fn history(&self, limit: usize) -> Result<Vec<ChatTurn>> {
        self.store.recent(limit).await
    }

    async fn generate_reply(&self, text: &str) -> (String, ReplySource) {
        let started = Instant::now();
        let outcome = GenerationOutcome::from(self.generator.generate(text).await);
        debug!(
            model = self.generator.model(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generation call finished"
        );

        match outcome {
            GenerationOutcome::Candidate(reply) => (reply, ReplySource::Generated),
            GenerationOutcome::NoCandidate => (UNCERTAIN_REPLY.to_string(), ReplySource::Uncertain),
            GenerationOutcome::Failed(err) => {
                error!(model = self.generator.model(), "Generation call failed: {err}");
                (FALLBACK_REPLY.to_string(), ReplySource::Fallback)
            }
        }
    }
}
