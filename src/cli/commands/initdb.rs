use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, info, instrument};

/// Creates the `users` and `complaints` tables if they are missing.
///
/// Safe to run against an existing database: applied migrations are skipped.
#[instrument]
pub async fn init_database(database_url: &str) -> Result<()> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("connecting to {}", database_url))?;

    let pending = Migrator::get_pending_migrations(&db)
        .await
        .context("reading migration state")?;
    if pending.is_empty() {
        info!("Schema is up to date");
        return Ok(());
    }

    for migration in &pending {
        debug!("Pending migration {}", migration.name());
    }
    info!("Applying {} migration(s)", pending.len());

    Migrator::up(&db, None)
        .await
        .context("applying migrations")?;

    info!("Complaint store ready");
    Ok(())
}
