use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::fixtures::RepositoryFixture;
use crate::handlers::{get_raw_file, health_check};

pub struct MockServer {
    fixture: Arc<RepositoryFixture>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::with_fixture(RepositoryFixture::create_test_fixture())
    }

    pub fn with_fixture(fixture: RepositoryFixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/{owner}/{repo}/{branch}/{*path}", get(get_raw_file))
            .layer(TraceLayer::new_for_http())
            .with_state(self.fixture.clone())
    }

    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Starting GitHub Mock Server on {}", addr);
        axum::serve(listener, self.router())
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))
    }

    /// Serve on an ephemeral localhost port in the background.
    ///
    /// Returns the base URL to use as `raw_base_url` and the server task.
    pub async fn spawn(self) -> anyhow::Result<(String, JoinHandle<()>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = self.router();

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Mock server stopped: {}", e);
            }
        });

        Ok((format!("http://{}", addr), handle))
    }

    pub fn get_fixture(&self) -> Arc<RepositoryFixture> {
        self.fixture.clone()
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}
