// Main entry point for the drinks API server

use std::sync::Arc;

use anyhow::{Context, Result};
use drinks_core::domains::auth::TokenVerifier;
use drinks_core::domains::drinks::Drink;
use drinks_core::kernel::PgDrinkStore;
use drinks_core::server::{build_app, AppState};
use drinks_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,drinks_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Drinks API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    if config.reset_database_on_start {
        tracing::warn!("RESET_DATABASE_ON_START is set, dropping all drinks");
        let seeded = Drink::drop_and_create_all(&pool)
            .await
            .context("Failed to reset drinks table")?;
        tracing::info!(id = seeded.id, title = %seeded.title, "Seeded example drink");
    }

    // Load the identity provider's signing keys
    let token_verifier = TokenVerifier::from_jwks_url(
        &config.jwks_url(),
        config.issuer(),
        config.api_audience.clone(),
    )
    .await
    .context("Failed to load signing keys")?;
    tracing::info!(
        issuer = token_verifier.issuer(),
        audience = token_verifier.audience(),
        "Token verifier ready"
    );

    // Build application
    let state = AppState::new(
        Arc::new(PgDrinkStore::new(pool)),
        Arc::new(token_verifier),
    );
    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
