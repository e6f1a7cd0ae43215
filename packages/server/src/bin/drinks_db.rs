//! CLI for managing the drinks database
//!
//! Outputs one JSON line per command so scripts can parse the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drinks_core::domains::drinks::Drink;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "drinks_db")]
#[command(about = "Database maintenance for the drinks API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Drop every drink, restart ids and seed the example drink
    Reset {
        /// Required; this deletes all data
        #[arg(long)]
        yes: bool,
    },

    /// Insert the example drink if it is missing
    Seed,
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drink_id: Option<i32>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => cmd_migrate().await,
        Commands::Reset { yes } => cmd_reset(yes).await,
        Commands::Seed => cmd_seed().await,
    }
}

async fn get_pool() -> Result<PgPool> {
    // Only the database is needed here, not the full server config
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_migrate() -> Result<()> {
    let pool = get_pool().await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output(Response {
        success: true,
        message: Some("Migrations complete".to_string()),
        drink_id: None,
    })
}

async fn cmd_reset(confirmed: bool) -> Result<()> {
    if !confirmed {
        return output(Response {
            success: false,
            message: Some("Refusing to reset without --yes".to_string()),
            drink_id: None,
        });
    }

    let pool = get_pool().await?;
    let drink = Drink::drop_and_create_all(&pool)
        .await
        .context("Failed to reset drinks table")?;

    output(Response {
        success: true,
        message: Some(format!("Reset complete, seeded '{}'", drink.title)),
        drink_id: Some(drink.id),
    })
}

async fn cmd_seed() -> Result<()> {
    let pool = get_pool().await?;
    let seeded = Drink::seed(&pool)
        .await
        .context("Failed to seed example drink")?;

    output(Response {
        success: true,
        message: Some(match seeded {
            Some(_) => "Seeded example drink".to_string(),
            None => "Example drink already present".to_string(),
        }),
        drink_id: seeded.map(|d| d.id),
    })
}
