use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::aspect::implementations::register_controller_logging;
use crate::aspect::{AspectPipeline, OperationRegistry, Proxy};
use crate::config::{AppConfig, ServerConfig};
use crate::controller::EmployeeController;
use crate::database::{DatabaseManager, EmployeeStore, SqlEmployeeStore};
use crate::handlers;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub employees: Proxy<EmployeeController>,
}

impl AppState {
    /// Wire the controller to `store`, seed it if configured, and weave the logging aspect
    pub async fn with_store(store: Arc<dyn EmployeeStore>, seed_count: Option<usize>) -> anyhow::Result<Self> {
        let controller = Arc::new(EmployeeController::new(store.clone()));

        if let Some(count) = seed_count {
            controller.init(count).await?;
        }

        let mut registry = OperationRegistry::new();
        registry.register(controller.as_ref());

        let pipeline = register_controller_logging(
            AspectPipeline::builder(),
            EmployeeController::NAME,
            EmployeeController::UPDATE,
        )
        .build(&registry);

        Ok(Self {
            store,
            employees: Proxy::new(controller, Arc::new(pipeline)),
        })
    }

    /// Build state from configuration: connect storage, then wire everything
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = DatabaseManager::connect(&config.database).await?;
        let store: Arc<dyn EmployeeStore> = Arc::new(SqlEmployeeStore::new(pool));
        let seed = config
            .database
            .seed_on_startup
            .then_some(config.database.seed_count);

        Self::with_store(store, seed).await
    }
}

pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        // Employee resource
        .route(
            "/employee",
            get(handlers::employee::list)
                .post(handlers::employee::create)
                .put(handlers::employee::update),
        )
        .with_state(state);

    if server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}
