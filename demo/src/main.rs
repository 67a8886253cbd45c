mod args;
mod domain;
mod entity;
mod http;

use clap::Parser;
use sea_orm::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::http::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db = Database::connect(&args.database_url).await?;
    let state = AppState::new(db);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, http::router(state)).await?;

    Ok(())
}
