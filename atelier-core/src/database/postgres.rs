use std::fmt;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::{
    database::repositories::{images::PostgresImageRepository, likes::PostgresLikeRepository},
    error::{GalleryError, Result},
};

/// Owner of the connection pool; repositories are constructed over clones
/// of it.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(connection_string)
            .await
            .map_err(|e| GalleryError::internal(format!("database connection failed: {e}")))?;

        info!(
            "database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(Self {
            pool,
            max_connections,
            min_connections,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| GalleryError::internal(format!("migration failed: {e}")))?;
        Ok(())
    }

    pub fn images(&self) -> PostgresImageRepository {
        PostgresImageRepository::new(self.pool.clone())
    }

    pub fn likes(&self) -> PostgresLikeRepository {
        PostgresLikeRepository::new(self.pool.clone())
    }
}
