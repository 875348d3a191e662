use crate::admission::Verdict;
use crate::context::RequestContext;
use crate::policy::CorsEvaluation;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// One admission decision, shaped for the access log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecord {
    pub origin: Option<String>,
    pub detected_origin: Option<String>,
    pub verdict: &'static str,
    pub allowed: bool,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: String,
}

impl AccessRecord {
    pub fn new(request: &RequestContext<'_>, evaluation: &CorsEvaluation) -> Self {
        Self {
            origin: evaluation.origin.clone(),
            detected_origin: evaluation.detected_origin.clone(),
            verdict: evaluation.verdict.as_str(),
            allowed: evaluation.verdict.is_allowed(),
            ip: request.client_ip.map(str::to_owned),
            user_agent: request.user_agent.map(str::to_owned),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Whether this record is worth writing. Requests with no trace of a caller are skipped.
    pub fn is_observable(&self) -> bool {
        self.origin.is_some() || self.detected_origin.is_some()
    }

    pub fn emit(&self) {
        let origin = self.origin.as_deref().unwrap_or("-");
        let detected = self.detected_origin.as_deref().unwrap_or("-");
        let ip = self.ip.as_deref().unwrap_or("-");
        let user_agent = self.user_agent.as_deref().unwrap_or("-");

        if self.verdict == Verdict::Denied.as_str() {
            warn!(
                target: "dynamic_cors_rs::audit",
                origin,
                detected_origin = detected,
                verdict = self.verdict,
                allowed = self.allowed,
                ip,
                user_agent,
                timestamp = %self.timestamp,
                "domain access"
            );
        } else {
            info!(
                target: "dynamic_cors_rs::audit",
                origin,
                detected_origin = detected,
                verdict = self.verdict,
                allowed = self.allowed,
                ip,
                user_agent,
                timestamp = %self.timestamp,
                "domain access"
            );
        }
    }
}
