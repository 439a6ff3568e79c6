pub mod client;
pub mod models;

use thiserror::Error;

pub use client::VenueClient;
pub use models::VenuePricing;

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("venue '{0}' not found")]
    NotFound(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("invalid venue provider base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid venue data: {0}")]
    InvalidData(String),
}
