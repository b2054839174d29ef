use crate::aggregation;
use crate::storage::{NewSubscription, StorageResult, Subscription, SubscriptionStore};
use std::sync::Arc;
use tracing::info;

/// Orchestration layer between the transport and the store.
///
/// Every operation is a stateless single-shot call: validation policy
/// lives at the transport boundary, persistence in the store, and store
/// errors (including `NotFound`) propagate unchanged so the caller can
/// map them to a response.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, sub: &NewSubscription) -> StorageResult<i64> {
        info!(user_id = %sub.user_id, "creating subscription");
        self.store.create(sub).await
    }

    /// Total monthly cost over every subscription stored for the user.
    /// A user with no records totals 0.
    pub async fn get_total_cost(&self, user_id: &str) -> StorageResult<i64> {
        let subscriptions = self.store.get_all_by_user_id(user_id).await?;
        Ok(aggregation::total_cost(&subscriptions))
    }

    pub async fn update(&self, sub: &Subscription) -> StorageResult<()> {
        info!(id = sub.id, "updating subscription");
        self.store.update(sub).await
    }

    pub async fn delete(&self, id: i64) -> StorageResult<()> {
        self.store.delete(id).await
    }
}
