//! ReviewAI server - HTTP endpoints for AI code review and PDF reports

mod error;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use reviewai_core::completion::HttpCompletionClient;
use reviewai_core::Config;
use reviewai_db::Database;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use state::AppState;

/// ReviewAI: AI-powered code review with PDF reports
#[derive(Parser, Debug)]
#[command(name = "reviewai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to (overrides config)
    #[arg(long, env = "REVIEWAI_BIND")]
    bind: Option<String>,

    /// Path to the SQLite database (overrides config)
    #[arg(long, env = "REVIEWAI_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Completion endpoint URL (overrides config and env)
    #[arg(long, env = "REVIEWAI_API_URL")]
    api_url: Option<String>,

    /// API key for the completion endpoint
    #[arg(long, env = "REVIEWAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model to use (overrides config and env)
    #[arg(long, env = "REVIEWAI_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.api_url, cli.api_key, cli.model)?;

    let bind = cli
        .bind
        .unwrap_or_else(|| config.server.bind_addr.clone());

    // Persistence is best-effort end to end: when the store cannot be opened
    // the server still serves reviews, it just stops recording them
    let db_path = cli.db_path.or_else(|| config.server.database_path.clone());
    let database = match open_database(db_path).await {
        Ok(db) => Some(db),
        Err(err) => {
            tracing::warn!(error = %err, "database unavailable, reviews will not be persisted");
            None
        }
    };

    let client = Arc::new(HttpCompletionClient::new(&config.completion));
    tracing::info!(
        model = %config.completion.model,
        api_url = %config.completion.api_url,
        "completion client configured"
    );

    let state = AppState::new(client, database, config.completion.sampling());
    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(address = %bind, "reviewai server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_database(path: Option<PathBuf>) -> reviewai_db::Result<Database> {
    match path {
        Some(path) => Database::new(path).await,
        None => Database::open_default().await,
    }
}
