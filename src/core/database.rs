use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Apply the embedded schema (`item`, `m_level`, `m_user`, `m_kategori`, `m_barang`)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map Postgres integrity violations onto the application's constraint error
///
/// Foreign-key and unique violations are expected user-facing failures
/// (unknown `level_id`, duplicate `username`); everything else stays a
/// database error.
pub fn classify(err: sqlx::Error, what: &str) -> crate::core::error::AppError {
    use crate::core::error::AppError;

    if let Some(db_err) = err.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::ConstraintViolation(format!("{} references a missing record", what));
        }
        if db_err.is_unique_violation() {
            return AppError::ConstraintViolation(format!("{} already exists", what));
        }
    }
    tracing::error!("Database error on {}: {:?}", what, err);
    AppError::Database(err)
}
