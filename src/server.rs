use crate::{
    config::Config,
    error::AppError,
    routes,
    service::SubscriptionService,
    shutdown::ShutdownCoordinator,
    storage::{StorageFactory, SubscriptionStore},
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct Server {
    pub config: Config,
    pub store: Arc<dyn SubscriptionStore>,
    pub service: SubscriptionService,
}

impl Server {
    /// Build the store from config and wire up the service.
    /// The pool created here is the process-lifetime storage handle.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let store = StorageFactory::create_from_config(&config).await?;
        let service = SubscriptionService::new(store.clone());

        Ok(Self {
            config,
            store,
            service,
        })
    }

    pub fn create_app(&self) -> Router {
        Router::new()
            .merge(routes::create_subscription_routes())
            .merge(routes::create_health_routes())
            .with_state(self.clone())
    }

    pub async fn run(self) -> Result<(), AppError> {
        let shutdown = ShutdownCoordinator::new();
        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.wait_for_shutdown_signal().await;
            })
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("Server exited");
        Ok(())
    }
}
