//! Configuration for the anthology source

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, RAW_BASE_URL_ENV};
pub use types::*;
