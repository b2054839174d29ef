use crate::{
    dates::MonthDate,
    error::AppError,
    storage::{NewSubscription, Subscription},
};
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

/// Create subscription API routes
pub fn create_subscription_routes() -> Router<crate::server::Server> {
    Router::new()
        .route("/subscriptions", post(create_subscription))
        .route("/subscriptions/total", get(get_total_cost))
        .route("/subscriptions/{id}", put(update_subscription))
        .route("/subscriptions/{id}", delete(delete_subscription))
}

/// Request body for create and update
#[derive(Debug, Deserialize)]
pub struct SubscriptionRequest {
    pub service_name: String,
    /// Monthly price in minor currency units
    pub price: i64,
    pub user_id: String,
    pub start_date: MonthDate,
    pub end_date: Option<MonthDate>,
}

impl SubscriptionRequest {
    /// Input policy lives here, not in the core: the store accepts
    /// whatever it is handed.
    fn validate(&self) -> Result<(), AppError> {
        if self.service_name.is_empty() {
            return Err(AppError::Validation(
                "service_name must not be empty".to_string(),
            ));
        }
        if self.price < 0 {
            return Err(AppError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Query parameters for the total cost endpoint
#[derive(Debug, Deserialize)]
pub struct TotalCostQuery {
    pub user_id: String,
}

/// Response for the total cost endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct TotalCostResponse {
    pub user_id: String,
    pub total: i64,
}

/// Response for update and delete outcomes
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

async fn create_subscription(
    State(server): State<crate::server::Server>,
    Json(req): Json<SubscriptionRequest>,
) -> Result<(StatusCode, Json<Subscription>), AppError> {
    req.validate()?;

    let new = NewSubscription {
        service_name: req.service_name,
        price: req.price,
        user_id: req.user_id,
        start_date: req.start_date,
        end_date: req.end_date,
    };
    let id = server.service.create(&new).await?;

    let created = Subscription {
        id,
        service_name: new.service_name,
        price: new.price,
        user_id: new.user_id,
        start_date: new.start_date,
        end_date: new.end_date,
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_total_cost(
    State(server): State<crate::server::Server>,
    Query(params): Query<TotalCostQuery>,
) -> Result<Json<TotalCostResponse>, AppError> {
    if params.user_id.is_empty() {
        return Err(AppError::Validation("user_id required".to_string()));
    }

    let total = server.service.get_total_cost(&params.user_id).await?;

    Ok(Json(TotalCostResponse {
        user_id: params.user_id,
        total,
    }))
}

async fn update_subscription(
    State(server): State<crate::server::Server>,
    Path(id): Path<i64>,
    Json(req): Json<SubscriptionRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    req.validate()?;

    let sub = Subscription {
        id,
        service_name: req.service_name,
        price: req.price,
        user_id: req.user_id,
        start_date: req.start_date,
        end_date: req.end_date,
    };
    server.service.update(&sub).await?;

    Ok(Json(StatusResponse {
        status: "updated".to_string(),
    }))
}

async fn delete_subscription(
    State(server): State<crate::server::Server>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    server.service.delete(id).await?;

    Ok(Json(StatusResponse {
        status: "deleted".to_string(),
    }))
}
