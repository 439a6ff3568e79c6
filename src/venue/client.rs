use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::models::{DynamicVenueResponse, StaticVenueResponse, VenuePricing};
use super::VenueError;
use crate::config::Config;

/// HTTP client for the venue data provider
#[derive(Clone)]
pub struct VenueClient {
    http: Client,
    base_url: Url,
}

impl VenueClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, VenueError> {
        let base_url = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| VenueError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(VenueError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    /// `{base}/venues/{slug}/{record}`, with the slug encoded as a single path segment
    pub fn venue_url(&self, venue_slug: &str, record: &str) -> Result<Url, VenueError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VenueError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["venues", venue_slug, record]);
        Ok(url)
    }

    pub fn from_config(config: &Config) -> Result<Self, VenueError> {
        Self::new(
            config.venue_api_base_url.clone(),
            Duration::from_secs(config.venue_api_timeout_secs),
        )
    }

    /// Fetch the static and dynamic venue records concurrently and merge them
    pub async fn fetch_pricing(&self, venue_slug: &str) -> Result<VenuePricing, VenueError> {
        let (static_data, dynamic_data) = tokio::try_join!(
            self.get_json::<StaticVenueResponse>(venue_slug, "static"),
            self.get_json::<DynamicVenueResponse>(venue_slug, "dynamic"),
        )?;

        VenuePricing::try_from((static_data, dynamic_data))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        venue_slug: &str,
        record: &str,
    ) -> Result<T, VenueError> {
        let url = self.venue_url(venue_slug, record)?;
        tracing::debug!(url = %url, "Fetching venue data");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Venue provider request failed");
            VenueError::Request(e)
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(VenueError::NotFound(venue_slug.to_string())),
            status if !status.is_success() => {
                tracing::warn!(url = %url, status = %status, "Venue provider returned an error");
                return Err(VenueError::Status(status.as_u16()));
            }
            _ => {}
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                VenueError::InvalidData(format!("{} record: {}", record, e))
            } else {
                VenueError::Request(e)
            }
        })
    }
}
