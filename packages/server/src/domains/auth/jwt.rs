use anyhow::Result;
use axum::http::HeaderValue;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::jwks::fetch_jwks;
use crate::common::AuthError;

/// `aud` may be a single string or a list (Auth0 adds its userinfo audience)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// JWT Claims - the subset of an Auth0 access token this API reads
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Absent when the API has RBAC permissions disabled in Auth0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Check that `permission` was granted to this token
    pub fn require(&self, permission: &str) -> Result<(), AuthError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AuthError::PermissionsMissing)?;

        if permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied)
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::HeaderMissing)?;
    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(AuthError::NotBearer),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::NotBearer),
        [_] => Err(AuthError::TokenMissing),
        [_, token] => Ok(*token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Token Verifier - validates RS256 access tokens issued by the identity provider
///
/// Holds the provider's published key set; a token is accepted only if its
/// `kid` names an RSA key in that set, the signature verifies, and the
/// issuer, audience and expiry all check out.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: JwkSet,
    issuer: String,
    audience: String,
}

impl TokenVerifier {
    /// Create a verifier over an already-loaded key set
    pub fn new(keys: JwkSet, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Fetch the key set from `jwks_url` and build a verifier over it
    pub async fn from_jwks_url(jwks_url: &str, issuer: String, audience: String) -> Result<Self> {
        let keys = fetch_jwks(jwks_url).await?;
        Ok(Self::new(keys, issuer, audience))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Unparseable token header");
            AuthError::InvalidToken
        })?;

        if header.alg != Algorithm::RS256 {
            debug!(alg = ?header.alg, "Rejected token algorithm");
            return Err(AuthError::InvalidToken);
        }

        let kid = header.kid.ok_or(AuthError::UnknownKey)?;
        let jwk = self.keys.find(&kid).ok_or_else(|| {
            debug!(kid = %kid, "No signing key for token");
            AuthError::UnknownKey
        })?;

        let decoding_key = match &jwk.algorithm {
            AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|_| AuthError::MalformedKey)?,
            _ => return Err(AuthError::MalformedKey),
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                ErrorKind::InvalidRsaKey(_) => AuthError::MalformedKey,
                other => {
                    debug!(error = ?other, "Token rejected");
                    AuthError::InvalidToken
                }
            })
    }
}
