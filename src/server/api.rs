//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::Translator;
use crate::core::config::{Settings, TranslatorConfig};
use crate::core::links::web_translate_url;
use crate::core::models::{CombinedResult, TranslationApi, TranslationRequest};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    translator: Translator,
    settings: Settings,
}

impl AppState {
    /// State serving lookups with `settings` as the default backend selection
    pub fn new(translator: Translator, settings: Settings) -> Self {
        Self {
            translator,
            settings,
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// History size response
#[derive(Serialize)]
struct HistoryResponse {
    entries: usize,
}

/// Translation request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    /// Word or phrase to translate
    pub source_word: String,
    /// Defaults to `"auto"`
    pub source_lang: Option<String>,
    /// Target language code
    pub target_lang: String,
    /// Falls back to the server's configured backend
    pub translation_api: Option<TranslationApi>,
}

/// Translation response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    /// `resultGg` and, for Japanese input, `resultMazii`
    #[serde(flatten)]
    pub result: CombinedResult,
    /// Web page to retry manually, only for failed lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

/// Health check handler
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// History size handler
async fn history(State(state): State<Arc<AppState>>) -> axum::Json<HistoryResponse> {
    axum::Json(HistoryResponse {
        entries: state.translator.history().len().await,
    })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateBody>,
) -> axum::Json<TranslateResponse> {
    let mut settings = state.settings.clone();
    if let Some(api) = payload.translation_api {
        settings.translation_api = api;
    }

    let mut request = TranslationRequest::new(
        payload.source_word.as_str(),
        payload.target_lang.as_str(),
        settings.translation_api,
    );
    if let Some(source_lang) = payload.source_lang {
        request = request.with_source_lang(source_lang);
    }

    let result = state.translator.translate(&request, &settings).await;

    let fallback_url = if result.is_error() {
        warn!(
            "Translation failed for '{}': {}",
            payload.source_word, result.result_gg.error_message
        );
        Some(web_translate_url(
            settings.translation_api,
            &payload.target_lang,
            payload.source_word.trim(),
        ))
    } else {
        None
    };

    axum::Json(TranslateResponse {
        result,
        fallback_url,
    })
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .route("/history", get(history))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    let translator = Translator::new(&config)?;
    let app = router(AppState::new(translator, config.settings));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
