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

/// Map Postgres constraint violations to client-facing errors.
///
/// `entity` names the record type in messages (e.g. "Prompt").
pub fn map_db_error(entity: &str, e: sqlx::Error) -> crate::core::error::AppError {
    use crate::core::error::AppError;

    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict(format!("{} already exists.", entity));
        }

        // Check constraint violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23514")) {
            return AppError::Validation(format!(
                "{} violates constraint {}.",
                entity,
                db_err.constraint().unwrap_or("unknown")
            ));
        }

        // Foreign key violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::BadRequest(format!(
                "{} references a record that does not exist or is still referenced elsewhere.",
                entity
            ));
        }
    }

    tracing::error!("{} database error: {:?}", entity, e);
    AppError::Database(e)
}
