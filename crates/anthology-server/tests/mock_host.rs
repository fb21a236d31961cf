//! End-to-end page loads against the raw file mock

use anthology_core::SourceConfig;
use anthology_server::{AnthologyServer, ServerConfig};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use github_mock::MockServer;
use tower::ServiceExt;

async fn fetch_page(server: &AnthologyServer, uri: &str) -> (StatusCode, String) {
    let response = server
        .build_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn server_for(config: SourceConfig) -> AnthologyServer {
    AnthologyServer::from_source_config(config)
        .unwrap()
        .with_config(ServerConfig::default().with_logging(false))
}

#[tokio::test]
async fn test_last_entry_page() {
    let (base_url, handle) = MockServer::new().spawn().await.unwrap();
    let server = server_for(SourceConfig::default().with_raw_base_url(base_url));

    let (status, body) = fetch_page(&server, "/?entry=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<main id="content-display"><p>●The third tale is the newest.</p></main>"#));
    assert!(body.contains(r#"<a id="last-entry-link" href="?entry=2">"#));

    handle.abort();
}

#[tokio::test]
async fn test_all_entries_page_keeps_paragraphs() {
    let (base_url, handle) = MockServer::new().spawn().await.unwrap();
    let server = server_for(SourceConfig::default().with_raw_base_url(base_url));

    let (status, body) = fetch_page(&server, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(
        "<p>●The first tale begins in a quiet village.<br><br>It ends at dusk.<br><br>●The second tale is short."
    ));

    handle.abort();
}

#[tokio::test]
async fn test_missing_file_renders_error_page() {
    let (base_url, handle) = MockServer::new().spawn().await.unwrap();
    let config = SourceConfig {
        file_path: "Gone.txt".to_string(),
        ..SourceConfig::default().with_raw_base_url(base_url)
    };
    let server = server_for(config);

    let (status, body) = fetch_page(&server, "/?entry=0").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Error loading content from Gone.txt."));
    assert!(body.contains("'main' branch"));
    assert!(!body.contains("●"));

    handle.abort();
}
