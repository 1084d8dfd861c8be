use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::RunQueryDsl;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::domains::chat::{ChatTurn, NewChatTurn, Sender};
use crate::error::{NovaBotError, Result};
use crate::interfaces::providers::TurnStore;

mod schema;
use schema::chat_turns;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
const BUSY_TIMEOUT_PRAGMA: &str = "PRAGMA busy_timeout = 5000";

type SqliteAsyncConn = SyncConnectionWrapper<SqliteConnection>;
type SqlitePool = Pool<SqliteAsyncConn>;
type SqlitePooledConn<'a> = PooledConnection<'a, SqliteAsyncConn>;

#[derive(Queryable)]
struct TurnRow {
    id: i64,
    sender: String,
    text: String,
    created_at: i64,
}

impl TurnRow {
    fn into_turn(self) -> Result<ChatTurn> {
        Ok(ChatTurn {
            id: self.id,
            sender: Sender::parse(&self.sender)?,
            text: self.text,
            created_at: self.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = chat_turns)]
struct NewTurnRow<'a> {
    sender: &'a str,
    text: &'a str,
    created_at: i64,
}

#[derive(QueryableByName)]
struct RowId {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

/// Append-only turn log backed by a SQLite file.
#[derive(Clone)]
pub struct SqliteTurnStore {
    sqlite_path: String,
    pool: SqlitePool,
    write_gate: Arc<tokio::sync::Mutex<()>>,
}

impl SqliteTurnStore {
    pub async fn new(sqlite_path: impl AsRef<str>) -> Result<Self> {
        let sqlite_path = sqlite_path.as_ref();
        ensure_parent_dir(sqlite_path)?;
        run_migrations(sqlite_path).await?;

        let manager = AsyncDieselConnectionManager::<SqliteAsyncConn>::new(sqlite_path);
        let pool: SqlitePool = Pool::builder()
            .build(manager)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        info!(sqlite_path, "Opened chat turn store");
        Ok(Self {
            sqlite_path: sqlite_path.to_string(),
            pool,
            write_gate: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    pub fn sqlite_path(&self) -> &str {
        &self.sqlite_path
    }

    pub async fn count(&self) -> Result<i64> {
        let mut conn = self.conn().await?;
        chat_turns::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))
    }

    async fn conn(&self) -> Result<SqlitePooledConn<'_>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        diesel::sql_query(BUSY_TIMEOUT_PRAGMA)
            .execute(&mut conn)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        Ok(conn)
    }
}

#[async_trait]
impl TurnStore for SqliteTurnStore {
    async fn create(&self, turn: NewChatTurn) -> Result<ChatTurn> {
        let _guard = self.write_gate.lock().await;
        let mut conn = self.conn().await?;
        let new = NewTurnRow {
            sender: turn.sender.as_str(),
            text: &turn.text,
            created_at: chrono::Utc::now().timestamp(),
        };
        diesel::insert_into(chat_turns::table)
            .values(&new)
            .execute(&mut conn)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?;

        let row_id = diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<RowId>(&mut conn)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?;

        chat_turns::table
            .find(row_id.id)
            .first::<TurnRow>(&mut conn)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?
            .into_turn()
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ChatTurn>> {
        let mut conn = self.conn().await?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = chat_turns::table
            .order(chat_turns::id.desc())
            .limit(limit)
            .load::<TurnRow>(&mut conn)
            .await
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        rows.into_iter().rev().map(TurnRow::into_turn).collect()
    }
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| NovaBotError::Runtime(e.to_string()))?;
        }
    }
    Ok(())
}

async fn run_migrations(database_url: &str) -> Result<()> {
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&database_url)
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        diesel::RunQueryDsl::execute(diesel::sql_query(BUSY_TIMEOUT_PRAGMA), &mut conn)
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| NovaBotError::Database(e.to_string()))?;
        Ok::<_, NovaBotError>(())
    })
    .await
    .map_err(|e| NovaBotError::Runtime(e.to_string()))??;
    Ok(())
}
