use std::sync::Arc;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
};

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `postgres://...` or `sqlite://...` URL; the scheme selects the driver.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            sqlx_logging: false,
        }
    }
}

/// Storage handle passed explicitly to every repository.
///
/// Cloning is cheap: all clones share one connection, pool or mock.
///
/// # Example
/// ```ignore
/// let db = DbHandle::connect(&DatabaseConfig::new("sqlite://blog.db?mode=rwc")).await?;
/// let posts = SeaOrmPostRepository::new(db.clone());
/// let tags = SeaOrmTagResolver::new(db);
/// ```
#[derive(Debug, Clone)]
pub struct DbHandle {
    conn: Arc<DatabaseConnection>,
}

impl DbHandle {
    /// Open the connection pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.sqlx_logging)
            .to_owned();

        let conn = Database::connect(opts).await?;
        let backend = conn.get_database_backend();

        // Readers no longer block writers; the setting persists in the file.
        if backend == DatabaseBackend::Sqlite {
            conn.execute_unprepared("PRAGMA journal_mode=WAL").await?;
        }

        tracing::info!(
            backend = ?backend,
            pool = config.max_connections,
            "Database connected"
        );

        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection (mock databases in tests).
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Round-trip to the database; used by the health check.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
