use super::{StorageResult, SubscriptionStore, postgres::PostgresStore, sqlite::SqliteStore};
use crate::config::{Config, DatabaseConfig};
use std::sync::Arc;

/// Database backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

/// Storage factory for creating the appropriate store backend
pub struct StorageFactory;

impl StorageFactory {
    /// Create a store from application config
    pub async fn create_from_config(config: &Config) -> StorageResult<Arc<dyn SubscriptionStore>> {
        Self::create_storage(&config.database).await
    }

    /// Create a store with explicit database configuration
    pub async fn create_storage(
        config: &DatabaseConfig,
    ) -> StorageResult<Arc<dyn SubscriptionStore>> {
        let store: Arc<dyn SubscriptionStore> = match Self::backend_for_url(&config.url) {
            DatabaseBackend::Postgres => Arc::new(PostgresStore::new(config).await?),
            DatabaseBackend::Sqlite => Arc::new(SqliteStore::new(config).await?),
        };

        // Run database migrations if enabled
        if config.migration_on_startup {
            store.migrate().await?;
        }

        Ok(store)
    }

    /// Select the backend from the database URL scheme
    pub fn backend_for_url(url: &str) -> DatabaseBackend {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            DatabaseBackend::Postgres
        } else {
            // SQLite handles sqlite:// URLs and plain paths alike
            DatabaseBackend::Sqlite
        }
    }

    /// Create a migrated SQLite in-memory store for testing.
    ///
    /// The pool is capped at a single connection: every connection to
    /// `sqlite::memory:` opens its own database, so a wider pool would
    /// scatter rows across invisible copies.
    pub async fn create_test_storage() -> StorageResult<Arc<dyn SubscriptionStore>> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            migration_on_startup: true,
        };

        Self::create_storage(&config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_for_url() {
        assert_eq!(
            StorageFactory::backend_for_url("postgres://localhost/subtrack"),
            DatabaseBackend::Postgres
        );
        assert_eq!(
            StorageFactory::backend_for_url("postgresql://localhost/subtrack"),
            DatabaseBackend::Postgres
        );
        assert_eq!(
            StorageFactory::backend_for_url("sqlite://./data/subtrack.db"),
            DatabaseBackend::Sqlite
        );
        assert_eq!(
            StorageFactory::backend_for_url("sqlite::memory:"),
            DatabaseBackend::Sqlite
        );
    }

    #[tokio::test]
    async fn test_create_test_storage_is_migrated() {
        let store = StorageFactory::create_test_storage().await.unwrap();
        // Migrated store answers queries against the subscriptions table
        let subs = store.get_all_by_user_id("nobody").await.unwrap();
        assert!(subs.is_empty());
    }
}
