use serde::{Deserialize, Serialize};

pub mod health;
pub mod subscriptions;

pub use health::create_health_routes;
pub use subscriptions::create_subscription_routes;

/// Error body shared by every route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
}
