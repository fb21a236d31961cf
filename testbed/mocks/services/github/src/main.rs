use github_mock::{MockServer, RepositoryFixture};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let fixtures_path = env::var("FIXTURES_PATH").unwrap_or_else(|_| "./fixtures".to_string());
    let addr = env::var("MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let server = if let Ok(fixture_file) = fs::read_to_string(format!("{}/mock-repo-fixture.yaml", fixtures_path)) {
        tracing::info!("Loading fixtures from {}/mock-repo-fixture.yaml", fixtures_path);
        MockServer::with_fixture(RepositoryFixture::from_yaml(&fixture_file)?)
    } else {
        tracing::info!("No fixture file found, using default test fixture");
        MockServer::new()
    };

    server.serve(&addr).await
}
