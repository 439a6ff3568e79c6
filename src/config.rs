use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

pub const DEFAULT_VENUE_API_BASE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub venue_api_base_url: String,
    pub venue_api_timeout_secs: u64,
    pub rate_limit_per_minute: u32,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_var("SERVER_PORT", 8000)?,
            venue_api_base_url: env::var("VENUE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_VENUE_API_BASE_URL.to_string()),
            venue_api_timeout_secs: parse_var("VENUE_API_TIMEOUT_SECS", 10)?,
            rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", 100)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            venue_api_base_url: DEFAULT_VENUE_API_BASE_URL.to_string(),
            venue_api_timeout_secs: 10,
            rate_limit_per_minute: 100,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", name, raw)))
}
