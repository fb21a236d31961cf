//! Mock raw file host for testing anthology loading
//!
//! Serves repository files under the same `/{owner}/{repo}/{branch}/{path}`
//! layout as raw.githubusercontent.com, so tests can exercise real HTTP
//! fetches, 404s and empty documents without touching the network.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::{FileContent, Repository, RepositoryFixture, SAMPLE_ANTHOLOGY};
pub use server::MockServer;
