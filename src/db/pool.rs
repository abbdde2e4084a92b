//! Connection pool setup.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Connection;

use crate::config::DatabaseConfig;
use crate::db::DbError;

/// Idle connections above the minimum are closed after this long.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Bound on acquiring and pinging the first connection.
pub const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing derived from configuration.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.max_idle_connections.min(config.max_connections))
        .max_lifetime(config.max_lifetime)
        .idle_timeout(IDLE_TIMEOUT)
        .acquire_timeout(PING_TIMEOUT)
}

/// Open the pool and verify the database answers.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let options: PgConnectOptions = config.url.parse().map_err(DbError::Url)?;

    let pool = pool_options(config)
        .connect_with(options)
        .await
        .map_err(DbError::Connect)?;

    if let Err(e) = ping(&pool).await {
        pool.close().await;
        return Err(e);
    }

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = pool.options().get_min_connections(),
        max_lifetime = ?config.max_lifetime,
        "Database pool ready"
    );

    Ok(pool)
}

async fn ping(pool: &PgPool) -> Result<(), DbError> {
    let check = async {
        let mut conn = pool.acquire().await.map_err(DbError::Ping)?;
        conn.ping().await.map_err(DbError::Ping)
    };

    tokio::time::timeout(PING_TIMEOUT, check)
        .await
        .map_err(|_| DbError::PingTimeout(PING_TIMEOUT))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_pool_options_follow_config() {
        let mut config = AppConfig::default().database;
        config.max_connections = 8;
        config.max_idle_connections = 3;
        config.max_lifetime = Duration::from_secs(120);

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 8);
        assert_eq!(options.get_min_connections(), 3);
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(120)));
        assert_eq!(options.get_idle_timeout(), Some(IDLE_TIMEOUT));
    }

    #[test]
    fn test_min_connections_never_exceed_max() {
        let mut config = AppConfig::default().database;
        config.max_connections = 2;
        config.max_idle_connections = 10;

        assert_eq!(pool_options(&config).get_min_connections(), 2);
    }

    #[tokio::test]
    async fn test_malformed_url_is_rejected() {
        let mut config = AppConfig::default().database;
        config.url = "not a url".to_string();

        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, DbError::Url(_)));
    }
}
