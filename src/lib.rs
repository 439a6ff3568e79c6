pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pricing;
pub mod routes;
pub mod utils;
pub mod venue;

pub use config::Config;
pub use error::{AppError, AppResult};

use venue::VenueClient;

#[derive(Clone)]
pub struct AppState {
    pub venues: VenueClient,
}

impl AppState {
    pub fn new(config: &Config) -> AppResult<Self> {
        let venues = VenueClient::from_config(config)
            .map_err(|e| AppError::Config(format!("Failed to build venue client: {}", e)))?;
        Ok(Self { venues })
    }
}
