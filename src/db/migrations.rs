//! Schema migrations.

use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use crate::db::DbError;

/// Apply every pending migration found under `path`.
///
/// Already-applied migrations are skipped, so running this on an up-to-date
/// schema is a no-op.
pub async fn run_migrations(pool: &PgPool, path: &str) -> Result<(), DbError> {
    let migrator = Migrator::new(Path::new(path))
        .await
        .map_err(|source| DbError::MigrationSource {
            path: path.to_string(),
            source,
        })?;

    tracing::info!(path, count = migrator.iter().count(), "Applying database migrations");

    migrator.run(pool).await.map_err(DbError::Migrate)
}
