use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::dates::MonthDate;
use crate::health::{HealthCheckResult, HealthChecker};


pub mod factory;
pub mod migrations;
pub mod postgres;
pub mod sqlite;

pub use factory::StorageFactory;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A persisted subscription record.
///
/// `id` is assigned by the store on creation and never reused after
/// deletion. `user_id` is an opaque identifier, fixed at creation; the
/// store never validates it against any user registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub service_name: String,
    /// Monthly price in minor currency units.
    pub price: i64,
    pub user_id: String,
    pub start_date: MonthDate,
    /// The month after which the subscription no longer counts as active.
    /// Interpretation is left to the caller; aggregation ignores it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthDate>,
}

/// Creation input: a subscription without a store-assigned id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: MonthDate,
    pub end_date: Option<MonthDate>,
}

/// Persistent store for subscription rows.
///
/// Every operation is a single independently-atomic statement against the
/// shared connection pool; the store performs no retries and holds no
/// state of its own. Cancellation is the caller dropping the future.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Insert a new row and return the store-assigned id.
    async fn create(&self, sub: &NewSubscription) -> StorageResult<i64>;

    /// All rows belonging to `user_id`, ordered by id ascending.
    /// An unknown user yields an empty list, not an error.
    async fn get_all_by_user_id(&self, user_id: &str) -> StorageResult<Vec<Subscription>>;

    /// Update `service_name`, `price`, `start_date` and `end_date` of the
    /// row matching `sub.id`. The id and `user_id` are keys, never written.
    /// Zero affected rows is `StorageError::NotFound`.
    async fn update(&self, sub: &Subscription) -> StorageResult<()>;

    /// Remove the row with `id`. Zero affected rows is
    /// `StorageError::NotFound`.
    async fn delete(&self, id: i64) -> StorageResult<()>;

    /// Health check for the storage backend.
    async fn health_check(&self) -> StorageResult<()>;

    /// Run database migrations.
    async fn migrate(&self) -> StorageResult<()>;
}

/// Health checker implementation for the subscription store.
pub struct StorageHealthChecker {
    store: Arc<dyn SubscriptionStore>,
}

impl StorageHealthChecker {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HealthChecker for StorageHealthChecker {
    fn name(&self) -> &str {
        "storage"
    }

    async fn check(&self) -> HealthCheckResult {
        match self.store.health_check().await {
            Ok(()) => HealthCheckResult::healthy(),
            Err(e) => HealthCheckResult::unhealthy(format!("Storage health check failed: {}", e)),
        }
    }
}
