mod api;
mod app;
mod auth;
mod catalog;
mod config;
mod db;
mod error;
mod models;
mod schema;
mod store;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub use app::AppState;
use config::Config;

#[derive(Parser)]
#[command(name = "foodgram-server")]
#[command(about = "Foodgram recipe service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print the OpenAPI document and exit
    Openapi,
    /// Load ingredients from a JSON file into the catalog
    LoadIngredients {
        /// JSON array of {"name", "measurement_unit"} objects
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Openapi => {
            println!("{}", api::openapi().to_pretty_json()?);
            Ok(())
        }
        Commands::LoadIngredients { file } => {
            telemetry::init_telemetry()?;
            let config = Config::from_env()?;
            let pool = db::create_pool(&config.database_url, 1)?;
            let mut conn = pool.get().context("Failed to get database connection")?;
            let summary = catalog::load_catalog_file(&mut conn, &file)?;
            println!(
                "Ingredients loaded: {} inserted, {} skipped",
                summary.inserted, summary.skipped
            );
            Ok(())
        }
        Commands::Serve => serve().await,
    }
}

async fn serve() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url, config.db_pool_size)?;

    let state = AppState {
        pool: Arc::new(pool),
        config: Arc::new(config.clone()),
    };
    let app = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!(
        "Swagger UI available at {}",
        config.public_url("/swagger-ui/")
    );

    axum::serve(listener, app).await?;
    Ok(())
}
