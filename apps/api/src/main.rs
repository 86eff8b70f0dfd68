mod applications;
mod companies;
mod config;
mod contacts;
mod db;
mod errors;
mod links;
mod models;
mod routes;
mod schema;
mod seed;
mod sql;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::schema::build_schema;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job tracker API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and apply migrations
    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    if config.seed_demo_data {
        seed::seed_demo_data(&db).await?;
    }

    let schema = build_schema(db.clone());
    info!("GraphQL schema built");

    let state = AppState { db, schema };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr} (GraphiQL at http://{addr}/graphql)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
