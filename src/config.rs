use crate::repositories::{SeaOrmComplaintRepository, SeaOrmUserRepository};
use crate::schemas::AppState;
use crate::services::{ComplaintService, UserService};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://complaints.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// The one frontend origin CORS lets through.
    pub allowed_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

/// Connect to the configured database and wire repositories into services.
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.database_url))?;

    build_app_state(db, &config.allowed_origin)
}

/// Build the handler state around an existing connection.
pub fn build_app_state(db: DatabaseConnection, allowed_origin: &str) -> Result<AppState> {
    let allowed_origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("invalid CORS origin '{}'", allowed_origin))?;

    let users = UserService::new(Arc::new(SeaOrmUserRepository::new(db.clone())));
    let complaints = ComplaintService::new(Arc::new(SeaOrmComplaintRepository::new(db.clone())));

    Ok(AppState {
        db,
        users,
        complaints,
        allowed_origin,
    })
}
