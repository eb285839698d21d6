use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, deadpool};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

/// Handle onto the shared connection pool. Repos create one per call; the
/// underlying pool is process-wide.
pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    pub async fn new() -> Self {
        Database {
            pool: DB_POOL.clone(),
        }
    }

    pub async fn get_connection(
        &self,
    ) -> Result<Object<AsyncMysqlConnection>, deadpool::PoolError> {
        self.pool.get().await
    }
}

/// Lazily initialized global database connection pool
static DB_POOL: Lazy<Pool<AsyncMysqlConnection>> = Lazy::new(|| {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let manager = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
    let mut builder = Pool::builder(manager);
    if let Ok(size) = env::var("DATABASE_POOL_SIZE") {
        let size = size.parse().expect("DATABASE_POOL_SIZE must be a valid usize");
        builder = builder.max_size(size);
    }

    let pool = builder
        .build()
        .expect("Failed to create database connection pool");

    tracing::info!("Database connection pool initialized");

    pool
});
