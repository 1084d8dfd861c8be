use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::{Config, GeminiConfig};
use crate::domains::chat::ChatTurn;
use crate::error::{NovaBotError, Result};
use crate::interfaces::providers::{TextGenerator, TurnStore};
use crate::providers::gemini::GeminiProvider;
use crate::providers::memory::InMemoryTurnStore;
use crate::providers::sqlite::SqliteTurnStore;
use crate::services::message::{MessageHandler, EMPTY_TEXT_ERROR};

pub const MESSAGE_ROUTE: &str = "/bot/v1/message";
pub const HISTORY_ROUTE: &str = "/bot/v1/messages";
const INTERNAL_ERROR: &str = "Internal Server Error";
const DEFAULT_HISTORY_LIMIT: usize = 50;
const MAX_HISTORY_LIMIT: usize = 200;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<MessageHandler>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize)]
struct MessageRequest {
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageResponse {
    user_message: String,
    bot_message: String,
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct HistoryResponse {
    messages: Vec<ChatTurn>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(MESSAGE_ROUTE, post(message))
        .route(HISTORY_ROUTE, get(history))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::BUILD_VERSION.to_string(),
    })
}

async fn message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let text = match payload {
        Ok(Json(request)) => request.text,
        Err(rejection) => {
            tracing::debug!("Rejected message body: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, EMPTY_TEXT_ERROR);
        }
    };

    match state.handler.handle(text.as_deref()).await {
        Ok(exchange) => (
            StatusCode::OK,
            Json(MessageResponse {
                user_message: exchange.user_message,
                bot_message: exchange.bot_message,
            }),
        )
            .into_response(),
        Err(err) => failure_response(err),
    }
}

async fn history(State(state): State<AppState>, Query(query): Query<HistoryQuery>) -> Response {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    match state.handler.history(limit).await {
        Ok(messages) => (StatusCode::OK, Json(HistoryResponse { messages })).into_response(),
        Err(err) => failure_response(err),
    }
}

fn failure_response(err: NovaBotError) -> Response {
    if err.is_client_error() {
        return error_response(StatusCode::BAD_REQUEST, &err.to_string());
    }
    tracing::error!("Error in message controller: {err}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Wires the handler from configuration. `ephemeral` keeps turns in memory
/// instead of opening the SQLite file.
pub async fn build_state(config: &Config, ephemeral: bool) -> Result<AppState> {
    let store: Arc<dyn TurnStore> = if ephemeral {
        tracing::warn!("Running with an in-memory turn store; history is lost on exit");
        Arc::new(InMemoryTurnStore::new())
    } else {
        let path = config
            .sqlite_path()
            .map(str::to_string)
            .unwrap_or_else(crate::runtime_paths::default_db_path);
        Arc::new(SqliteTurnStore::new(path).await?)
    };

    let gemini = config.gemini.clone().unwrap_or_else(GeminiConfig::default);
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiProvider::from_config(&gemini)?);
    let replies = Arc::new(config.canned_replies());
    tracing::info!(
        canned_replies = replies.len(),
        model = generator.model(),
        "Message handler ready"
    );

    Ok(AppState {
        handler: Arc::new(MessageHandler::new(replies, generator, store)),
    })
}

pub async fn run(host: &str, port: u16, config: &Config, ephemeral: bool) -> Result<()> {
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for ctrl-c: {err}");
            futures::future::pending::<()>().await;
        }
        tracing::info!("Shutdown requested");
    };
    run_with_shutdown(host, port, config, ephemeral, shutdown).await
}

pub async fn run_with_shutdown<F>(
    host: &str,
    port: u16,
    config: &Config,
    ephemeral: bool,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(config, ephemeral).await?;
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NovaBotError::Runtime(e.to_string()))?;
    tracing::info!(%addr, "Nova daemon listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| NovaBotError::Runtime(e.to_string()))?;

    Ok(())
}
