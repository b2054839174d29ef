use super::{NewSubscription, StorageError, StorageResult, Subscription, SubscriptionStore};
use crate::config::DatabaseConfig;
use crate::dates::MonthDate;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Row, Sqlite, migrate::MigrateDatabase, sqlite::SqlitePoolOptions};

/// SQLite subscription store implementation
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub async fn new(config: &DatabaseConfig) -> StorageResult<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(&config.url).await.unwrap_or(false) {
            Sqlite::create_database(&config.url).await.map_err(|e| {
                StorageError::Connection(format!("Failed to create database: {}", e))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to connect to database: {}", e))
            })?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SubscriptionStore for SqliteStore {
    async fn create(&self, sub: &NewSubscription) -> StorageResult<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO subscriptions (service_name, price, user_id, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(&sub.user_id)
        .bind(NaiveDate::from(sub.start_date))
        .bind(sub.end_date.map(NaiveDate::from))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Database(format!("Failed to create subscription: {}", e)))?;

        Ok(row.get::<i64, _>("id"))
    }

    async fn get_all_by_user_id(&self, user_id: &str) -> StorageResult<Vec<Subscription>> {
        let rows = sqlx::query(
            "SELECT id, service_name, price, user_id, start_date, end_date \
             FROM subscriptions WHERE user_id = ?1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Database(format!("Failed to get subscriptions: {}", e)))?;

        let mut subscriptions = Vec::new();
        for row in rows {
            subscriptions.push(Subscription {
                id: row.get("id"),
                service_name: row.get("service_name"),
                price: row.get("price"),
                user_id: row.get("user_id"),
                start_date: MonthDate::from(row.get::<NaiveDate, _>("start_date")),
                end_date: row
                    .get::<Option<NaiveDate>, _>("end_date")
                    .map(MonthDate::from),
            });
        }

        Ok(subscriptions)
    }

    async fn update(&self, sub: &Subscription) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET service_name = ?1, price = ?2, start_date = ?3, end_date = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&sub.service_name)
        .bind(sub.price)
        .bind(NaiveDate::from(sub.start_date))
        .bind(sub.end_date.map(NaiveDate::from))
        .bind(sub.id)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(format!("Failed to update subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(format!("Failed to delete subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn migrate(&self) -> StorageResult<()> {
        super::migrations::run_sqlite_migrations(&self.pool).await
    }
}
