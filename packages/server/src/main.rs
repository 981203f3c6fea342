use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blog_server::config::AppConfig;
use blog_server::state::AppState;
use blog_server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let db = database::init_db(&config.database)
        .await
        .context("Failed to connect to the database")?;
    info!("Database schema is up to date");

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
            .await
            .context("Failed to bind server address")?;
    let addr = listener.local_addr()?;

    let app = build_router(AppState { db, config });

    info!("Server running at http://{}", addr);
    info!("API documentation at http://{}/swagger", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
