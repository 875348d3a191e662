use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::VARY},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use super::{ApiError, AppState};
use crate::audit::AccessRecord;
use crate::constants::header;
use crate::context::RequestContext;
use crate::headers::Headers;
use crate::policy::CorsDecision;

const REJECTION_MESSAGE: &str = "Not allowed by CORS";

/// Admit or refuse the caller's origin, answer admitted preflights and
/// decorate admitted responses with CORS headers.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let owned_ctx = OwnedRequestContext::from_request(&request);
    let context = owned_ctx.as_request_context();

    let evaluation = state.policy.evaluate(&context);

    let record = AccessRecord::new(&context, &evaluation);
    if record.is_observable() {
        record.emit();
    }

    match evaluation.decision {
        CorsDecision::PreflightAccepted { headers, status } => preflight_response(status, &headers),
        CorsDecision::SimpleAccepted { headers } => {
            let mut response = next.run(request).await;
            apply_headers(response.headers_mut(), &headers);
            response
        }
        CorsDecision::Rejected(_) => ApiError::forbidden(REJECTION_MESSAGE).into_response(),
        CorsDecision::NotApplicable => next.run(request).await,
    }
}

fn preflight_response(status: u16, headers: &Headers) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    let mut response = (status, Body::empty()).into_response();
    apply_headers(response.headers_mut(), headers);
    response
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) else {
            continue;
        };

        if header_name == VARY {
            merge_vary(map, value);
        } else {
            map.insert(header_name, header_value);
        }
    }
}

/// Fold `incoming` into whatever `Vary` the downstream handler already set.
fn merge_vary(map: &mut HeaderMap, incoming: &str) {
    let mut entries: Vec<String> = map
        .get_all(VARY)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect();

    if entries.iter().any(|entry| entry == "*") {
        return;
    }

    for entry in incoming.split(',').map(str::trim) {
        if !entry.is_empty() && !entries.iter().any(|e| e.eq_ignore_ascii_case(entry)) {
            entries.push(entry.to_owned());
        }
    }

    if let Ok(value) = HeaderValue::from_str(&entries.join(", ")) {
        map.insert(VARY, value);
    }
}

struct OwnedRequestContext {
    method: String,
    origin: Option<String>,
    referer: Option<String>,
    host: Option<String>,
    forwarded_proto: Option<String>,
    encrypted: bool,
    client_ip: Option<String>,
    user_agent: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request) -> Self {
        let headers = request.headers();

        let client_ip = header_value(headers, header::X_FORWARDED_FOR)
            .and_then(|value| value.split(',').next().map(|ip| ip.trim().to_string()))
            .filter(|ip| !ip.is_empty())
            .or_else(|| {
                request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            });

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            referer: header_value(headers, header::REFERER)
                .or_else(|| header_value(headers, header::REFERRER)),
            host: header_value(headers, header::HOST)
                .or_else(|| request.uri().authority().map(|authority| authority.to_string())),
            forwarded_proto: header_value(headers, header::X_FORWARDED_PROTO),
            encrypted: request.uri().scheme_str() == Some("https"),
            client_ip,
            user_agent: header_value(headers, header::USER_AGENT),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            referer: self.referer.as_deref(),
            host: self.host.as_deref(),
            forwarded_proto: self.forwarded_proto.as_deref(),
            encrypted: self.encrypted,
            client_ip: self.client_ip.as_deref(),
            user_agent: self.user_agent.as_deref(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
