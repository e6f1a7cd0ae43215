use anyhow::{Context, Result};
use jsonwebtoken::jwk::JwkSet;
use tracing::info;

/// Fetch the identity provider's published signing keys
pub async fn fetch_jwks(jwks_url: &str) -> Result<JwkSet> {
    let keys = reqwest::get(jwks_url)
        .await
        .with_context(|| format!("Failed to fetch JWKS from {}", jwks_url))?
        .error_for_status()
        .context("JWKS endpoint returned an error status")?
        .json::<JwkSet>()
        .await
        .context("JWKS response is not a valid key set")?;

    info!(url = %jwks_url, keys = keys.keys.len(), "Loaded signing keys");
    Ok(keys)
}
