use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::common::{ApiError, AuthError, Permission};
use crate::domains::auth::{bearer_token, Claims, TokenVerifier};

/// Authorization guard for a route
///
/// Verifies the bearer token and requires `P::NAME` in its permission set.
/// Rejection happens before the handler body runs, so a route taking this
/// extractor never touches the store for unauthorized callers.
#[derive(Debug, Clone)]
pub struct RequirePermission<P: Permission> {
    pub claims: Claims,
    permission: PhantomData<P>,
}

/// Verify the request's bearer token and check it grants `permission`
pub fn authorize(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
    permission: &str,
) -> Result<Claims, AuthError> {
    let token = bearer_token(headers.get(AUTHORIZATION))?;
    let claims = verifier.verify_token(token)?;
    claims.require(permission)?;
    Ok(claims)
}

#[async_trait]
impl<S, P> FromRequestParts<S> for RequirePermission<P>
where
    S: Send + Sync,
    Arc<TokenVerifier>: FromRef<S>,
    P: Permission,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = Arc::<TokenVerifier>::from_ref(state);

        let claims = authorize(&parts.headers, &verifier, P::NAME).map_err(|err| {
            debug!(
                permission = P::NAME,
                code = err.code(),
                "Request not authorized: {}",
                err
            );
            err
        })?;

        debug!(sub = %claims.sub, permission = P::NAME, "Authorized");
        Ok(Self {
            claims,
            permission: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::jwk::JwkSet;

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(JwkSet { keys: vec![] }, "https://issuer/", "drinks")
    }

    #[test]
    fn test_no_auth_header() {
        let headers = HeaderMap::new();
        let result = authorize(&headers, &verifier(), "post:drinks");
        assert_eq!(result.unwrap_err(), AuthError::HeaderMissing);
    }

    #[test]
    fn test_basic_auth_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        let result = authorize(&headers, &verifier(), "post:drinks");
        assert_eq!(result.unwrap_err(), AuthError::NotBearer);
    }

    #[test]
    fn test_invalid_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer invalid_token"));
        let result = authorize(&headers, &verifier(), "post:drinks");
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }
}
