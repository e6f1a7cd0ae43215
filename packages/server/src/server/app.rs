//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, patch},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domains::auth::TokenVerifier;
use crate::kernel::BaseDrinkStore;
use crate::server::routes::{
    create_drink, delete_drink, health_handler, index_handler, list_drinks, list_drinks_detail,
    method_not_allowed_handler, not_found_handler, update_drink,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub drink_store: Arc<dyn BaseDrinkStore>,
    pub token_verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(drink_store: Arc<dyn BaseDrinkStore>, token_verifier: Arc<TokenVerifier>) -> Self {
        Self {
            drink_store,
            token_verifier,
        }
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.token_verifier.clone()
    }
}

/// CORS for the browser frontend; an empty list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index_handler).fallback(method_not_allowed_handler))
        .route(
            "/drinks",
            get(list_drinks)
                .post(create_drink)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/drinks-detail",
            get(list_drinks_detail).fallback(method_not_allowed_handler),
        )
        .route(
            "/drinks/:id",
            patch(update_drink)
                .delete(delete_drink)
                .fallback(method_not_allowed_handler),
        )
        .route("/health", get(health_handler).fallback(method_not_allowed_handler))
        // Unknown paths; unsupported methods on known paths hit the per-route fallback
        .fallback(not_found_handler)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
