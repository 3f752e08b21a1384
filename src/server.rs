//! HTTP routes around the chat pipeline
//!
//! `/` banner, `/api/` hello, `/api/chat`, `/api/health` and the
//! `/api/status` log. CORS is wide open.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CoachConfig;
use crate::orchestrator::ChatOrchestrator;
use crate::providers::{CompatibleClient, CompletionProvider};
use crate::request::{ChatRequest, ChatResponse};
use crate::status::{StatusCheck, StatusCheckCreate, StatusLog};

pub const SERVICE_NAME: &str = "Scarletts Gesundheitstracking API";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState
{   pub orchestrator: Arc<ChatOrchestrator>
  , pub statuses: Arc<StatusLog>
}

impl AppState
{   pub fn new(orchestrator: ChatOrchestrator) -> Self
    {   AppState
        {   orchestrator: Arc::new(orchestrator)
          , statuses: Arc::new(StatusLog::new())
        }
    }

    /// Wire the orchestrator and provider client from configuration
    pub fn from_config(config: CoachConfig)
      -> Result<Self, crate::error::Error>
    {   let provider: Option<Arc<dyn CompletionProvider>>
          = match &config.provider
          {   Some(p) if p.is_configured() => {
                info!("Using provider {} at {}", p.name, p.api_base());
                let client: Arc<dyn CompletionProvider>
                  = Arc::new(CompatibleClient::new(p)?);
                Some(client)
              }
            , _ => None
          };
        Ok(AppState::new(ChatOrchestrator::new(config, provider)))
    }
}

/// Errors that reach the HTTP caller
#[derive(Debug)]
pub enum ApiError
{   Chat(crate::error::Error)
}

impl From<crate::error::Error> for ApiError
{   fn from(e: crate::error::Error) -> Self
    {   ApiError::Chat(e)
    }
}

impl IntoResponse for ApiError
{   fn into_response(self) -> Response
    {   let ApiError::Chat(e) = self;
        error!("Request failed: {}", e);
        let detail = if e.is_provider_failure()
        {   "LLM error"
        } else
        {   "Internal error"
        };
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "detail": detail })),
        ).into_response()
    }
}

/// Build the router with all routes and CORS
pub fn build_router(state: AppState) -> Router
{   let cors = CorsLayer::new()
      .allow_origin(Any)
      .allow_methods(Any)
      .allow_headers(Any);

    Router::new()
      .route("/", get(service_banner))
      .route("/api/", get(api_root))
      .route("/api/chat", post(chat))
      .route("/api/health", get(health))
      .route("/api/status", post(create_status_check).get(list_status_checks))
      .layer(cors)
      .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: CoachConfig) -> Result<(), crate::error::Error>
{   let addr = config.bind_addr.clone();
    let state = AppState::from_config(config)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} v{} listening on {}", SERVICE_NAME, VERSION, addr);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

pub async fn service_banner() -> Json<Value>
{   Json(json!({
      "service": SERVICE_NAME,
      "version": VERSION,
      "status": "online",
      "endpoints": ["/api/", "/api/chat", "/api/status", "/api/health"],
    }))
}

pub async fn api_root() -> Json<Value>
{   Json(json!({
      "message": format!("{} v{} - Chat & LLM Integration", SERVICE_NAME, VERSION)
    }))
}

pub async fn chat(
  State(state): State<AppState>
, Json(request): Json<ChatRequest>
) -> Result<Json<ChatResponse>, ApiError>
{   debug!("POST /api/chat");
    let response = state.orchestrator.chat(request).await?;
    Ok(Json(response))
}

pub async fn health(State(state): State<AppState>) -> Json<Value>
{   Json(json!({
      "status": "healthy",
      "version": VERSION,
      "service": SERVICE_NAME,
      "llm_available": state.orchestrator.has_provider(),
      "timestamp": chrono::Utc::now(),
    }))
}

pub async fn create_status_check(
  State(state): State<AppState>
, Json(input): Json<StatusCheckCreate>
) -> Json<StatusCheck>
{   Json(state.statuses.record(input).await)
}

pub async fn list_status_checks(
  State(state): State<AppState>
) -> Json<Vec<StatusCheck>>
{   Json(state.statuses.recent().await)
}
