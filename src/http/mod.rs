//! axum integration: admission middleware, operator routes and the app router.

pub mod admin;
pub mod app;
pub mod error;
pub mod middleware;

pub use app::{AppState, router};
pub use error::ApiError;
pub use middleware::cors_middleware;
