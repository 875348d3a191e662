#![allow(dead_code)]

use dynamic_cors_rs::constants::method;
use dynamic_cors_rs::{
    AdmissionController, CorsEvaluation, CorsOptions, CorsPolicy, OriginRegistry, Posture,
    RequestContext,
};
use std::sync::Arc;

#[derive(Default)]
pub struct PolicyBuilder {
    posture: Option<Posture>,
    options: Option<CorsOptions>,
    origins: Vec<String>,
    registry: Option<Arc<OriginRegistry>>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posture(mut self, posture: Posture) -> Self {
        self.posture = Some(posture);
        self
    }

    pub fn development(self) -> Self {
        self.posture(Posture::Development)
    }

    pub fn production(self) -> Self {
        self.posture(Posture::Production)
    }

    pub fn options(mut self, options: CorsOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn allow(mut self, origin: impl Into<String>) -> Self {
        self.origins.push(origin.into());
        self
    }

    pub fn registry(mut self, registry: Arc<OriginRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> CorsPolicy {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(OriginRegistry::new()));
        registry.extend(&self.origins);

        CorsPolicy::new(
            AdmissionController::new(registry, self.posture.unwrap_or_default()),
            self.options.unwrap_or_default(),
        )
    }
}

#[derive(Clone)]
pub struct RequestBuilder {
    method: String,
    origin: Option<String>,
    referer: Option<String>,
    host: Option<String>,
    forwarded_proto: Option<String>,
    encrypted: bool,
    client_ip: Option<String>,
    user_agent: Option<String>,
}

impl RequestBuilder {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.into(),
            origin: None,
            referer: None,
            host: None,
            forwarded_proto: None,
            encrypted: false,
            client_ip: None,
            user_agent: None,
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn forwarded_proto(mut self, proto: impl Into<String>) -> Self {
        self.forwarded_proto = Some(proto.into());
        self
    }

    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = encrypted;
        self
    }

    pub fn client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn with_context<T>(&self, f: impl FnOnce(&RequestContext<'_>) -> T) -> T {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            referer: self.referer.as_deref(),
            host: self.host.as_deref(),
            forwarded_proto: self.forwarded_proto.as_deref(),
            encrypted: self.encrypted,
            client_ip: self.client_ip.as_deref(),
            user_agent: self.user_agent.as_deref(),
        };
        f(&ctx)
    }

    pub fn evaluate(&self, policy: &CorsPolicy) -> CorsEvaluation {
        self.with_context(|ctx| policy.evaluate(ctx))
    }
}

pub fn policy() -> PolicyBuilder {
    PolicyBuilder::new()
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}
