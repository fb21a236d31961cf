//! HTTP front-end for an anthology
//!
//! Every `GET /` is one page load: the document is fetched, segmented and
//! rendered, with the optional `entry` query parameter choosing a single
//! entry. Nothing is cached between requests.

pub mod error;

pub use error::{Result, ServerError};

use anthology_core::page::PageView;
use anthology_core::selection::ENTRY_PARAM;
use anthology_core::source::build_client;
use anthology_core::{DocumentSource, EntryList, EntryLoader, HttpSource, LoadError, SourceConfig};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::{middleware, Router};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

#[derive(Serialize)]
struct EntriesResponse<'a> {
    source: String,
    count: usize,
    last_entry_index: Option<usize>,
    entries: &'a EntryList,
}

/// Configuration for the anthology server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Enable permissive CORS
    pub enable_cors: bool,
    /// Enable request logging
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3002)),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Parse and set the bind address from a string.
    pub fn with_bind_addr_str(mut self, addr: &str) -> Result<Self> {
        self.bind_addr = addr
            .parse()
            .map_err(|e| ServerError::config_error(format!("Invalid bind address '{}': {}", addr, e)))?;
        Ok(self)
    }

    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

/// Shared application state: where to look and how to fetch.
#[derive(Clone)]
pub struct AppState {
    pub source: SourceConfig,
    pub documents: Arc<dyn DocumentSource>,
}

impl AppState {
    async fn load(&self) -> std::result::Result<EntryList, LoadError> {
        EntryLoader::new(self.documents.clone()).load().await
    }
}

async fn page_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // A repeated `entry` resolves to its first value.
    let raw_entry = params
        .iter()
        .find(|(key, _)| key == ENTRY_PARAM)
        .map(|(_, value)| value.as_str());

    let outcome = state.load().await;
    let page = PageView::from_outcome(&state.source, &outcome, raw_entry);

    let status = if page.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Html(page.to_html())).into_response()
}

async fn entries_handler(State(state): State<AppState>) -> Response {
    match state.load().await {
        Ok(entries) => Json(EntriesResponse {
            source: state.source.describe(),
            count: entries.len(),
            last_entry_index: entries.last_index(),
            entries: &entries,
        })
        .into_response(),
        Err(e) => {
            let err = ServerError::from(e);
            log::error!("Failed to load entries from {}: {}", state.source.describe(), err);
            let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(json!({
                    "error": err.error_type(),
                    "details": err.to_string(),
                    "source": state.source.describe(),
                    "timestamp": chrono::Utc::now()
                })),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Anthology HTTP server.
pub struct AnthologyServer {
    state: AppState,
    config: ServerConfig,
}

impl AnthologyServer {
    /// Serve pages from any document source.
    pub fn new(source: SourceConfig, documents: Arc<dyn DocumentSource>) -> Self {
        Self {
            state: AppState { source, documents },
            config: ServerConfig::default(),
        }
    }

    /// Serve pages fetched over HTTP from the configured raw file URL.
    pub fn from_source_config(source: SourceConfig) -> Result<Self> {
        let client = build_client()
            .map_err(|e| ServerError::config_error(format!("Failed to create HTTP client: {}", e)))?;
        let documents = Arc::new(HttpSource::with_client(client, &source));
        Ok(Self::new(source, documents))
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/", get(page_handler))
            .route("/entries", get(entries_handler))
            .route("/health", get(health_handler))
            .with_state(self.state.clone());

        if self.config.enable_logging {
            router = router.layer(middleware::from_fn(
                |request: axum::http::Request<axum::body::Body>, next: axum::middleware::Next| async move {
                    let request_id = uuid::Uuid::new_v4().to_string();
                    let method = request.method().clone();
                    let uri = request.uri().clone();

                    // Health probes are noisy.
                    if uri.path() == "/health" {
                        log::debug!("Request {} {} {}", request_id, method, uri);
                    } else {
                        log::info!("Request {} {} {}", request_id, method, uri);
                    }

                    let start = std::time::Instant::now();
                    let response = next.run(request).await;
                    log::info!(
                        "Response {} {} in {:?}",
                        request_id,
                        response.status(),
                        start.elapsed()
                    );

                    response
                },
            ));
        }

        router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(self.config.bind_addr).await.map_err(|e| {
            log::error!("Failed to bind to {}: {}", self.config.bind_addr, e);
            ServerError::Io(e)
        })
    }

    /// Start the server and listen for connections.
    ///
    /// This method will block until the server is shut down.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending::<()>()).await
    }

    /// Start the server with graceful shutdown support.
    pub async fn serve_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        let router = self.build_router();

        log::info!("Anthology server starting on {}", self.config.bind_addr);
        log::info!("Serving {}", self.state.source.describe());
        log::info!("Page: http://{}/?{}=<index>", self.config.bind_addr, ENTRY_PARAM);
        log::info!("Entries: http://{}/entries", self.config.bind_addr);
        log::info!("Health check: http://{}/health", self.config.bind_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        log::info!("Anthology server shut down gracefully");
        Ok(())
    }
}

/// Utility function to create a shutdown signal from Ctrl+C.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            log::info!("Received SIGTERM, shutting down...");
        },
    }
}
