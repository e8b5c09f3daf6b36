//! Database migrations
//!
//! SQL files under `migrations/` are embedded at compile time and applied
//! in version order.

use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// A dirty migration (recorded but not completed) aborts the run unless
/// `force` is set, in which case the failed record is removed and the run is
/// retried once.
pub async fn run_migrations(config: &Config) -> Result<()> {
    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    info!("Applying migrations to database");
    let result = apply(&pool, config.force_migration).await;

    pool.close().await;
    result?;
    info!("Database migrations applied");
    Ok(())
}

async fn apply(pool: &PgPool, force: bool) -> Result<()> {
    match MIGRATOR.run(pool).await {
        Ok(()) => Ok(()),
        Err(MigrateError::Dirty(version)) if force => {
            warn!(version, "Dirty migration found, clearing it and retrying");
            clear_dirty(pool, version).await?;
            MIGRATOR
                .run(pool)
                .await
                .context("Failed to run migrations after clearing dirty state")
        }
        Err(MigrateError::Dirty(version)) => Err(anyhow::anyhow!(
            "migration {} is dirty; set FORCE_MIGRATION=true to clear it and retry",
            version
        )),
        Err(e) => Err(e).context("Failed to run migrations"),
    }
}

async fn clear_dirty(pool: &PgPool, version: i64) -> Result<()> {
    sqlx::query("DELETE FROM _sqlx_migrations WHERE version = $1 AND success = false")
        .bind(version)
        .execute(pool)
        .await
        .context("Failed to clear dirty migration record")?;
    Ok(())
}
