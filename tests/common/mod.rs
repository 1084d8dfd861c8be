#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use nova_bot::canned::CannedReplies;
use nova_bot::domains::chat::{ChatTurn, NewChatTurn};
use nova_bot::error::{NovaBotError, Result};
use nova_bot::interfaces::providers::{Generation, TextGenerator, TurnStore};
use nova_bot::providers::memory::InMemoryTurnStore;
use nova_bot::services::message::MessageHandler;

pub enum Scripted {
    Reply(&'static str),
    Nothing,
    Fail,
}

/// Generator that answers from a script and records what it was asked.
pub struct ScriptedGenerator {
    script: Scripted,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(script: Scripted) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, text: &str) -> Result<Generation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(text.to_string());
        match self.script {
            Scripted::Reply(reply) => Ok(Generation::Candidate(reply.to_string())),
            Scripted::Nothing => Ok(Generation::NoCandidate),
            Scripted::Fail => Err(NovaBotError::Http("quota exhausted".to_string())),
        }
    }
}

/// Store whose writes start failing after `ok_writes` successes.
pub struct BrokenStore {
    inner: InMemoryTurnStore,
    ok_writes: usize,
    attempts: AtomicUsize,
}

impl BrokenStore {
    pub fn failing_after(ok_writes: usize) -> Self {
        Self {
            inner: InMemoryTurnStore::new(),
            ok_writes,
            attempts: AtomicUsize::new(0),
        }
    }

    pub async fn stored(&self) -> Vec<ChatTurn> {
        self.inner.snapshot().await
    }
}

#[async_trait]
impl TurnStore for BrokenStore {
    async fn create(&self, turn: NewChatTurn) -> Result<ChatTurn> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt >= self.ok_writes {
            return Err(NovaBotError::Database("disk I/O error".to_string()));
        }
        self.inner.create(turn).await
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<ChatTurn>> {
        Err(NovaBotError::Database("disk I/O error".to_string()))
    }
}

pub fn handler_with(
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn TurnStore>,
) -> MessageHandler {
    MessageHandler::new(Arc::new(CannedReplies::builtin()), generator, store)
}
