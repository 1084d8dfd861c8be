use tempfile::tempdir;

use nova_bot::domains::chat::{NewChatTurn, Sender};
use nova_bot::interfaces::providers::TurnStore;
use nova_bot::providers::sqlite::SqliteTurnStore;

#[tokio::test]
async fn create_echoes_stored_record() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("turns.db");
    let store = SqliteTurnStore::new(db_path.to_str().unwrap()).await.unwrap();

    let user = store.create(NewChatTurn::user("  Hello  ")).await.unwrap();
    let bot = store
        .create(NewChatTurn::bot("Hi, how can I help you today?"))
        .await
        .unwrap();

    assert_eq!(user.sender, Sender::User);
    assert_eq!(user.text, "  Hello  ");
    assert_eq!(bot.sender, Sender::Bot);
    assert!(bot.id > user.id);
    assert!(user.created_at > 0);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn recent_is_oldest_first_and_limited() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("turns.db");
    let store = SqliteTurnStore::new(db_path.to_str().unwrap()).await.unwrap();

    for text in ["one", "two", "three", "four"] {
        store.create(NewChatTurn::user(text)).await.unwrap();
    }

    let recent = store.recent(3).await.unwrap();
    let texts: Vec<&str> = recent.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["two", "three", "four"]);
}

#[tokio::test]
async fn reopening_keeps_turns_and_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("data").join("turns.db");
    let db_path = db_path.to_str().unwrap().to_string();

    {
        let store = SqliteTurnStore::new(&db_path).await.unwrap();
        store.create(NewChatTurn::user("persist me")).await.unwrap();
    }

    let store = SqliteTurnStore::new(&db_path).await.unwrap();
    assert_eq!(store.sqlite_path(), db_path);
    let turns = store.recent(10).await.unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].text, "persist me");
}

#[tokio::test]
async fn concurrent_writes_all_land() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("turns.db");
    let store = SqliteTurnStore::new(db_path.to_str().unwrap()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(NewChatTurn::user(format!("message {i}")))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(store.count().await.unwrap(), 8);
}
