//! Test fixtures: tokens signed with the checked-in test RSA key and an
//! app wired to the in-memory drink store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use drinks_core::domains::auth::TokenVerifier;
use drinks_core::kernel::MockDrinkStore;
use drinks_core::server::{build_app, AppState};
use jsonwebtoken::{encode, jwk::JwkSet, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_KID: &str = "test-key-1";
pub const ISSUER: &str = "https://coffee.test.auth0.com/";
pub const AUDIENCE: &str = "drinks";

const TEST_PEM: &[u8] = include_bytes!("../fixtures/test_rsa.pem");
const TEST_N: &str = "lH3FOVbQzhMwmrOhdVyin7XIjgow9YZa-4bgJp85GCKDO1xBCXJk7SNgM1FjDJKPHBhO9gepgmNuLJyUzN4t_pf_zL2uB3i-VY84gDsq-s7hiogd8kfxSvrtvtdog37vqzOqNHm_NgfKGTRpsSkM_SS6Dmt3A32JAvIl9L8p4PMqAQwO1SvHNhETalewii5fDBfBVzr3OeENDu4QoxnK4k6L4b9QqRaiSszBoTv4Craj3wlzKGZyCpCVYaGZoMcvxBudQ087qc7jvJz5Bt5C91qXilp1p9NQbbwQBGFWS5jgSX1GKkREQBhJ7ANhoFsUEP1mV7732DtCemzPO6U0Sw";

pub const BARISTA: &[&str] = &["get:drinks-detail"];
pub const MANAGER: &[&str] = &[
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

pub fn test_verifier() -> TokenVerifier {
    let keys: JwkSet = serde_json::from_value(json!({
        "keys": [{"kty": "RSA", "kid": TEST_KID, "use": "sig", "alg": "RS256", "n": TEST_N, "e": "AQAB"}]
    }))
    .expect("test JWKS is valid");
    TokenVerifier::new(keys, ISSUER, AUDIENCE)
}

/// Builds access tokens the way the identity provider would
pub struct TokenBuilder {
    kid: String,
    claims: Value,
}

impl TokenBuilder {
    pub fn new() -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            kid: TEST_KID.to_string(),
            claims: json!({
                "sub": "auth0|test-user",
                "iss": ISSUER,
                "aud": AUDIENCE,
                "iat": now,
                "exp": now + 3600,
                "permissions": [],
            }),
        }
    }

    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        self.claims["permissions"] = json!(permissions);
        self
    }

    pub fn without_permissions(mut self) -> Self {
        if let Some(claims) = self.claims.as_object_mut() {
            claims.remove("permissions");
        }
        self
    }

    pub fn expired(mut self) -> Self {
        let now = chrono::Utc::now().timestamp();
        self.claims["iat"] = json!(now - 7200);
        self.claims["exp"] = json!(now - 3600);
        self
    }

    pub fn audience(mut self, audience: &str) -> Self {
        self.claims["aud"] = json!(audience);
        self
    }

    pub fn kid(mut self, kid: &str) -> Self {
        self.kid = kid.to_string();
        self
    }

    pub fn sign(self) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.kid);
        let key = EncodingKey::from_rsa_pem(TEST_PEM).expect("test key is valid PEM");
        encode(&header, &self.claims, &key).expect("token signs")
    }
}

pub fn token(permissions: &[&str]) -> String {
    TokenBuilder::new().permissions(permissions).sign()
}

pub const WATER: &str = r#"[{"name":"water","color":"blue","parts":1}]"#;
pub const LATTE: &str = r#"[{"name":"espresso","color":"brown","parts":1},{"name":"milk","color":"white","parts":3}]"#;

pub fn test_app(store: MockDrinkStore) -> Router {
    let state = AppState::new(Arc::new(store), Arc::new(test_verifier()));
    build_app(state, &[])
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request through the router and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
