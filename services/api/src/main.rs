use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod jwt;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod store;
mod validation;

use common::database::{self, DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::jwt::{JwtConfig, JwtService};
use crate::state::AppState;
use crate::store::PostgresStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool, &sqlx::migrate!("./migrations")).await?;

    let jwt = JwtService::new(JwtConfig::from_env()?);
    let store = Arc::new(PostgresStore::new(pool));
    let app_state = AppState::new(store, jwt);

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:3001").await?;
    info!("API service listening on 0.0.0.0:3001");

    // Connect info feeds the client IP recorded on refresh tokens
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
