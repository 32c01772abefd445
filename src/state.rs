use crate::config::{AppConfig, SessionConfig};
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        db::migrate(&db).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Migrated in-memory database with default settings.
    pub async fn for_tests() -> anyhow::Result<Self> {
        let db = db::connect_in_memory().await?;
        db::migrate(&db).await?;

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            session: SessionConfig {
                cookie_name: "session".into(),
                ttl_minutes: 5,
                secure_cookie: false,
            },
            plants_public: false,
        });

        Ok(Self::from_parts(db, config))
    }
}
