//! Operator routes for inspecting and extending the allow-list.

use axum::{
    Json, Router,
    extract::{Request, State, rejection::JsonRejection},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, AppState};
use crate::error::AdmissionError;

#[derive(Debug, Default, Deserialize)]
pub struct DomainRequest {
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AllowedDomains {
    pub domains: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DomainAdded {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DomainTest {
    pub domain: String,
    pub allowed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStats {
    pub total_allowed_domains: usize,
    pub last_updated: String,
}

pub fn admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/allowed-domains", get(list_domains).post(add_domain))
        .route("/test-domain", post(test_domain))
        .route("/domain-stats", get(domain_stats))
        .route_layer(middleware::from_fn_with_state(state, admin_auth))
}

pub async fn list_domains(State(state): State<AppState>) -> Json<Envelope<AllowedDomains>> {
    let domains = state.registry().allowed_origins();
    Envelope::ok(AllowedDomains {
        count: domains.len(),
        domains,
    })
}

pub async fn add_domain(
    State(state): State<AppState>,
    payload: Result<Json<DomainRequest>, JsonRejection>,
) -> Result<Json<DomainAdded>, ApiError> {
    let Json(body) = payload?;
    let domain = required_domain(body)?;
    state.registry().learn(&domain)?;
    info!(domain = %domain, "added allowed domain");

    Ok(Json(DomainAdded {
        success: true,
        message: format!("Domain {domain} added successfully"),
    }))
}

pub async fn test_domain(
    State(state): State<AppState>,
    payload: Result<Json<DomainRequest>, JsonRejection>,
) -> Result<Json<Envelope<DomainTest>>, ApiError> {
    let Json(body) = payload?;
    let domain = required_domain(body)?;
    let allowed = state.registry().is_allowed(&domain);

    Ok(Envelope::ok(DomainTest { domain, allowed }))
}

pub async fn domain_stats(State(state): State<AppState>) -> Json<Envelope<DomainStats>> {
    Envelope::ok(DomainStats {
        total_allowed_domains: state.registry().len(),
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Require `Authorization: Bearer <token>` when an admin token is configured.
async fn admin_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = state.admin_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented == Some(token) {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::unauthorized())
    }
}

fn required_domain(body: DomainRequest) -> Result<String, AdmissionError> {
    body.domain
        .map(|domain| domain.trim().to_owned())
        .filter(|domain| !domain.is_empty())
        .ok_or(AdmissionError::MissingDomain)
}
