//! Auth domain - verifies access tokens issued by the external identity provider
//!
//! Tokens are never minted here; the provider signs RS256 JWTs carrying a
//! `permissions` claim and publishes its keys as a JWKS document.

pub mod jwks;
pub mod jwt;

pub use jwks::fetch_jwks;
pub use jwt::{bearer_token, Audience, Claims, TokenVerifier};
