use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    /// Auth0 tenant domain, e.g. `coffee-shop.us.auth0.com`
    pub auth0_domain: String,
    pub api_audience: String,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
    pub reset_database_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            auth0_domain: env::var("AUTH0_DOMAIN").context("AUTH0_DOMAIN must be set")?,
            api_audience: env::var("API_AUDIENCE").context("API_AUDIENCE must be set")?,
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            reset_database_on_start: env::var("RESET_DATABASE_ON_START")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .context("RESET_DATABASE_ON_START must be true or false")?,
        })
    }

    /// Token issuer for the configured Auth0 tenant
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth0_domain)
    }

    /// Published signing key set for the configured Auth0 tenant
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.auth0_domain)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
