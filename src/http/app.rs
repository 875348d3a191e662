use axum::{Json, Router, middleware, routing::get};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::admin::admin_router;
use super::{ApiError, cors_middleware};
use crate::policy::CorsPolicy;
use crate::registry::OriginRegistry;

/// Shared handles for every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<CorsPolicy>,
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(policy: CorsPolicy, admin_token: Option<String>) -> Self {
        Self {
            policy: Arc::new(policy),
            admin_token: admin_token.map(Arc::from),
        }
    }

    pub fn registry(&self) -> &OriginRegistry {
        self.policy.controller().registry()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/cors", admin_router(state.clone()))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn fallback() -> ApiError {
    ApiError::not_found()
}
