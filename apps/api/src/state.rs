use sqlx::SqlitePool;

use crate::schema::TrackerSchema;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// GraphQL schema; carries its own clone of the pool as context data.
    pub schema: TrackerSchema,
}
