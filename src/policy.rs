use crate::admission::{AdmissionController, Verdict};
use crate::constants::{header, method};
use crate::context::RequestContext;
use crate::detect::{detect_origin, request_origin};
use crate::headers::{HeaderCollection, Headers};
use crate::options::CorsOptions;

/// Why a request was refused CORS headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub origin: String,
    pub preflight: bool,
}

/// What the HTTP layer should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Answer the preflight immediately; downstream handlers are not run.
    PreflightAccepted { headers: Headers, status: u16 },
    /// Run downstream handlers and attach these headers to the response.
    SimpleAccepted { headers: Headers },
    /// Origin refused. No CORS headers may be emitted.
    Rejected(Rejection),
    /// No origin presented; pass through untouched.
    NotApplicable,
}

/// Full result of evaluating one request.
#[derive(Debug, Clone)]
pub struct CorsEvaluation {
    pub verdict: Verdict,
    /// The `Origin` header the decision was made on.
    pub origin: Option<String>,
    /// Best-effort caller origin from `Origin`, `Referer` or `Host`.
    pub detected_origin: Option<String>,
    pub decision: CorsDecision,
}

/// Admission plus response header construction.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    controller: AdmissionController,
    options: CorsOptions,
}

impl CorsPolicy {
    pub fn new(controller: AdmissionController, options: CorsOptions) -> Self {
        Self {
            controller,
            options,
        }
    }

    pub fn controller(&self) -> &AdmissionController {
        &self.controller
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    pub fn evaluate(&self, request: &RequestContext<'_>) -> CorsEvaluation {
        let origin = request_origin(request);
        let detected_origin = detect_origin(request);
        let verdict = self.controller.admit(origin);
        if verdict == Verdict::NoOrigin
            && let Some(detected) = detected_origin.as_deref()
        {
            self.controller.learn_detected(detected);
        }
        let is_preflight = request.method.eq_ignore_ascii_case(method::OPTIONS);

        let decision = match (origin, verdict) {
            (None, _) | (_, Verdict::NoOrigin) => CorsDecision::NotApplicable,
            (Some(origin), Verdict::Denied) => CorsDecision::Rejected(Rejection {
                origin: origin.to_owned(),
                preflight: is_preflight,
            }),
            (Some(origin), _) if is_preflight => CorsDecision::PreflightAccepted {
                headers: self.preflight_headers(origin),
                status: self.options.preflight_status,
            },
            (Some(origin), _) => CorsDecision::SimpleAccepted {
                headers: self.simple_headers(origin),
            },
        };

        CorsEvaluation {
            verdict,
            origin: origin.map(str::to_owned),
            detected_origin,
            decision,
        }
    }

    fn preflight_headers(&self, origin: &str) -> Headers {
        let mut headers = HeaderCollection::with_estimate(5);
        self.build_origin_headers(&mut headers, origin);
        if let Some(methods) = self.options.methods_value() {
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
        }
        if let Some(allowed) = self.options.allowed_headers_value() {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, allowed);
        }
        self.build_credentials_header(&mut headers);
        headers.into_headers()
    }

    fn simple_headers(&self, origin: &str) -> Headers {
        let mut headers = HeaderCollection::with_estimate(4);
        self.build_origin_headers(&mut headers, origin);
        self.build_credentials_header(&mut headers);
        if self.options.content_security_policy {
            headers.push(header::CONTENT_SECURITY_POLICY, content_security_policy(origin));
        }
        headers.into_headers()
    }

    fn build_origin_headers(&self, headers: &mut HeaderCollection, origin: &str) {
        headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.add_vary(header::ORIGIN);
    }

    fn build_credentials_header(&self, headers: &mut HeaderCollection) {
        if self.options.credentials {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
    }
}

/// The `Content-Security-Policy` value sent alongside admitted simple responses.
pub fn content_security_policy(origin: &str) -> String {
    format!(
        "default-src 'self' {origin}; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'"
    )
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
