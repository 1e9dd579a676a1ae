use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::ingestor::{ImportPipeline, RowErrorPolicy};
use crate::repositories::{PitcherRepository, PositionPlayerRepository, StatRepository, StatTable};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Shared handle to the SQLite pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub fn pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        // Every connection to `:memory:` opens its own empty database, so an
        // in-memory pool is pinned to one connection that is never recycled.
        let in_memory = config.url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .acquire_timeout(Duration::from_secs(30))
        };

        let pool = pool_options.connect_with(options).await?;
        debug!("Opened SQLite pool for {}", config.url);

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::MigrationFailed {
                message: e.to_string(),
            })?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Round-trip a trivial query to confirm the pool can reach the database
    pub async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx("SELECT 1", e))?;
        Ok(())
    }

    /// Repository for the table holding records of type `T`
    pub fn table<T: StatTable>(&self) -> StatRepository<T> {
        StatRepository::new(self.pool())
    }

    pub fn position_players(&self) -> PositionPlayerRepository {
        self.table()
    }

    pub fn pitchers(&self) -> PitcherRepository {
        self.table()
    }

    /// Build an import pipeline writing into this database
    pub fn import_pipeline(
        &self,
        policy: RowErrorPolicy,
    ) -> ImportPipeline<PositionPlayerRepository, PitcherRepository> {
        ImportPipeline::new(self.position_players(), self.pitchers(), policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        }
    }

    #[tokio::test]
    async fn in_memory_database_migrates_and_answers_ping() {
        let database = Database::new(&memory_config()).await.unwrap();
        database.migrate().await.unwrap();
        database.ping().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('position_players', 'pitchers') ORDER BY name",
        )
        .fetch_all(&database.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["pitchers", "position_players"]);
    }

    #[tokio::test]
    async fn migrations_can_run_twice() {
        let database = Database::new(&memory_config()).await.unwrap();
        database.migrate().await.unwrap();
        database.migrate().await.unwrap();
    }
}
