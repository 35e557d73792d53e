//! HTTP front end for the todo service.
//!
//! # Design
//! `app` builds the axum router over an explicitly constructed `AppState`.
//! The state holds the gateway (if a database is configured) and is cloned
//! into every handler; it is never mutated after startup.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};
use todo_core::{MemoryTodoStore, MongoTodoStore, TodoGateway, TodoStore};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{ServiceConfig, StoreBackend};
use crate::error::ApiError;

pub use crate::config::ConfigError;

/// Which database settings were present when the service started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvStatus {
    pub database_url_set: bool,
    pub database_name_set: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) gateway: Option<TodoGateway>,
    pub(crate) env: EnvStatus,
}

impl AppState {
    pub fn new(gateway: Option<TodoGateway>, env: EnvStatus) -> Self {
        Self { gateway, env }
    }

    pub fn with_store(store: Arc<dyn TodoStore>) -> Self {
        Self::new(Some(TodoGateway::new(store)), EnvStatus::default())
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryTodoStore::new()))
    }

    /// State with no database; every data endpoint answers 500.
    pub fn unconfigured() -> Self {
        Self::new(None, EnvStatus::default())
    }

    /// Build the store selected by `config`. A missing or failing database
    /// leaves the state unconfigured rather than aborting startup.
    pub async fn from_config(config: &ServiceConfig) -> Self {
        let env = EnvStatus {
            database_url_set: config.database_url.is_some(),
            database_name_set: config.database_name.is_some(),
        };
        let store: Option<Arc<dyn TodoStore>> = match config.store {
            StoreBackend::Memory => {
                let name = config.database_name.as_deref().unwrap_or("memory");
                info!(database = name, "using in-memory store");
                Some(Arc::new(MemoryTodoStore::named(name)))
            }
            StoreBackend::MongoDb => {
                match (&config.database_url, &config.database_name) {
                    (Some(url), Some(name)) => match MongoTodoStore::connect(url, name).await {
                        Ok(store) => {
                            info!(database = name.as_str(), "using mongodb store");
                            Some(Arc::new(store))
                        }
                        Err(err) => {
                            warn!(error = %err, "mongodb unavailable, data endpoints disabled");
                            None
                        }
                    },
                    _ => {
                        warn!("DATABASE_URL or DATABASE_NAME not set, data endpoints disabled");
                        None
                    }
                }
            }
        };
        Self::new(store.map(TodoGateway::new), env)
    }

    pub fn gateway(&self) -> Result<&TodoGateway, ApiError> {
        self.gateway.as_ref().ok_or(ApiError::NotConfigured)
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(diagnostics::root))
        .route("/test", get(diagnostics::test_database))
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/api/todos/{id}",
            patch(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
