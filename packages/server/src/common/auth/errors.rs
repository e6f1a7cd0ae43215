use axum::http::StatusCode;
use thiserror::Error;

/// Bearer token and permission failures.
///
/// Each variant maps to a stable machine-readable `code` and an HTTP status;
/// the display string is the human-readable description sent to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    HeaderMissing,

    #[error("Authorization header must start with \"Bearer\".")]
    NotBearer,

    #[error("Token not found.")]
    TokenMissing,

    #[error("Authorization header must be bearer token.")]
    MalformedHeader,

    #[error("Unable to parse authentication token.")]
    InvalidToken,

    #[error("Unable to find the appropriate key.")]
    UnknownKey,

    #[error("Unable to parse the signing key.")]
    MalformedKey,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Permissions not included in JWT.")]
    PermissionsMissing,

    #[error("Permission not found.")]
    PermissionDenied,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::HeaderMissing => "authorization_header_missing",
            AuthError::NotBearer
            | AuthError::TokenMissing
            | AuthError::MalformedHeader
            | AuthError::InvalidToken
            | AuthError::UnknownKey
            | AuthError::MalformedKey => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims | AuthError::PermissionsMissing => "invalid_claims",
            AuthError::PermissionDenied => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MalformedKey | AuthError::PermissionsMissing => StatusCode::BAD_REQUEST,
            AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_failures_are_unauthorized() {
        for err in [
            AuthError::HeaderMissing,
            AuthError::NotBearer,
            AuthError::TokenMissing,
            AuthError::MalformedHeader,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "{err:?}");
        }
        assert_eq!(AuthError::HeaderMissing.code(), "authorization_header_missing");
        assert_eq!(AuthError::NotBearer.code(), "invalid_header");
    }

    #[test]
    fn test_expired_token_has_distinct_code() {
        assert_eq!(AuthError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.code(), "token_expired");
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired.");
    }

    #[test]
    fn test_malformed_key_is_bad_request() {
        assert_eq!(AuthError::MalformedKey.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UnknownKey.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_permission_is_forbidden() {
        assert_eq!(AuthError::PermissionDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::PermissionDenied.code(), "unauthorized");
        assert_eq!(AuthError::PermissionsMissing.status(), StatusCode::BAD_REQUEST);
    }
}
