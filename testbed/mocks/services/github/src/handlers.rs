use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::fixtures::RepositoryFixture;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "application/json")],
        r#"{"status":"ok","service":"github-mock"}"#,
    )
}

/// `GET /{owner}/{repo}/{branch}/{*path}`, the raw.githubusercontent.com layout.
pub async fn get_raw_file(
    Path((owner, repo, branch, path)): Path<(String, String, String, String)>,
    State(fixture): State<Arc<RepositoryFixture>>,
) -> Result<impl IntoResponse, StatusCode> {
    match fixture.get_file(&owner, &repo, &branch, &path) {
        Some(file_content) => {
            tracing::debug!("Serving {}/{}@{}:{}", owner, repo, branch, path);
            Ok((
                StatusCode::OK,
                [("content-type", "text/plain; charset=utf-8")],
                file_content.content.clone(),
            )
                .into_response())
        }
        None => {
            tracing::debug!("Not found: {}/{}@{}:{}", owner, repo, branch, path);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
