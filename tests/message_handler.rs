mod common;

use std::sync::Arc;

use nova_bot::domains::chat::Sender;
use nova_bot::error::NovaBotError;
use nova_bot::providers::memory::InMemoryTurnStore;
use nova_bot::services::message::{
    ReplySource, EMPTY_TEXT_ERROR, FALLBACK_REPLY, UNCERTAIN_REPLY,
};

use common::{handler_with, BrokenStore, Scripted, ScriptedGenerator};

#[tokio::test]
async fn blank_text_is_rejected_without_writes() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("unused")));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator.clone(), store.clone());

    for input in [None, Some(""), Some("   "), Some("\n\t "), Some("\u{feff} ")] {
        let err = handler.handle(input).await.unwrap_err();
        assert!(matches!(err, NovaBotError::Validation(ref msg) if msg == EMPTY_TEXT_ERROR));
    }
    assert!(store.snapshot().await.is_empty());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn canned_phrase_skips_generator() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("unused")));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator.clone(), store.clone());

    let exchange = handler.handle(Some("Hello")).await.unwrap();
    assert_eq!(exchange.bot_message, "Hi, how can I help you today?");
    assert_eq!(exchange.user_message, "Hello");
    assert_eq!(exchange.source, ReplySource::Canned);

    let exchange = handler.handle(Some("  TELL me a JOKE  ")).await.unwrap();
    assert_eq!(
        exchange.bot_message,
        "Why do programmers prefer dark mode? Because light attracts bugs! 🐛"
    );
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn miss_uses_generated_candidate_with_original_text() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("Paris.")));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator.clone(), store.clone());

    let exchange = handler
        .handle(Some("  What is the capital of France? "))
        .await
        .unwrap();
    assert_eq!(exchange.bot_message, "Paris.");
    assert_eq!(exchange.source, ReplySource::Generated);
    assert_eq!(generator.prompts(), vec!["  What is the capital of France? "]);
}

#[tokio::test]
async fn empty_generation_falls_back_to_uncertain_reply() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Nothing));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator, store.clone());

    let exchange = handler.handle(Some("explain monads")).await.unwrap();
    assert_eq!(exchange.bot_message, UNCERTAIN_REPLY);
    assert_eq!(exchange.source, ReplySource::Uncertain);
    assert_eq!(store.snapshot().await.len(), 2);
}

#[tokio::test]
async fn generator_failure_is_swallowed() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Fail));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator.clone(), store.clone());

    let exchange = handler.handle(Some("explain monads")).await.unwrap();
    assert_eq!(exchange.bot_message, FALLBACK_REPLY);
    assert_eq!(exchange.source, ReplySource::Fallback);
    assert_eq!(generator.calls(), 1);

    let turns = store.snapshot().await;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].text, FALLBACK_REPLY);
}

#[tokio::test]
async fn success_writes_user_then_bot_turn() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("unused")));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator, store.clone());

    handler.handle(Some(" Good Night ")).await.unwrap();

    let turns = store.snapshot().await;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].sender, Sender::User);
    assert_eq!(turns[0].text, " Good Night ");
    assert_eq!(turns[1].sender, Sender::Bot);
    assert_eq!(turns[1].text, "Good night 🌙 Sweet dreams!");
}

#[tokio::test]
async fn failed_user_write_surfaces_and_skips_generation() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("unused")));
    let store = Arc::new(BrokenStore::failing_after(0));
    let handler = handler_with(generator.clone(), store.clone());

    let err = handler.handle(Some("what is rust")).await.unwrap_err();
    assert!(matches!(err, NovaBotError::Database(_)));
    assert!(!err.is_client_error());
    assert_eq!(generator.calls(), 0);
    assert!(store.stored().await.is_empty());
}

#[tokio::test]
async fn failed_bot_write_surfaces_as_server_error() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("ok")));
    let store = Arc::new(BrokenStore::failing_after(1));
    let handler = handler_with(generator, store.clone());

    let err = handler.handle(Some("what is rust")).await.unwrap_err();
    assert!(matches!(err, NovaBotError::Database(_)));
    assert_eq!(store.stored().await.len(), 1);
}

#[tokio::test]
async fn history_returns_latest_turns() {
    let generator = Arc::new(ScriptedGenerator::new(Scripted::Reply("unused")));
    let store = Arc::new(InMemoryTurnStore::new());
    let handler = handler_with(generator, store);

    handler.handle(Some("hi")).await.unwrap();
    handler.handle(Some("bye")).await.unwrap();

    let history = handler.history(2).await.unwrap();
    let texts: Vec<&str> = history.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["bye", "Goodbye! Take care and have a great day 👋"]);
}
