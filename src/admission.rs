use crate::registry::OriginRegistry;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Deployment mode. Only [`Posture::Development`] learns unknown origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Posture {
    Development,
    #[default]
    Production,
}

impl Posture {
    pub fn learns_origins(self) -> bool {
        matches!(self, Posture::Development)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Posture::Development => "development",
            Posture::Production => "production",
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosture(pub String);

impl fmt::Display for UnknownPosture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown posture {:?}", self.0)
    }
}

impl std::error::Error for UnknownPosture {}

impl FromStr for Posture {
    type Err = UnknownPosture;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Posture::Development),
            "production" | "prod" => Ok(Posture::Production),
            _ => Err(UnknownPosture(value.to_owned())),
        }
    }
}

/// Outcome of admitting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No origin was presented; non-browser callers are let through.
    NoOrigin,
    /// The origin is on the exact list or matches a trusted pattern.
    Allowed,
    /// Unknown origin admitted in development and added to the exact list.
    /// Origins failing validation are admitted as [`Verdict::Allowed`] instead.
    Learned,
    /// Unknown origin refused in production.
    Denied,
}

impl Verdict {
    pub fn is_allowed(self) -> bool {
        !matches!(self, Verdict::Denied)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::NoOrigin => "no_origin",
            Verdict::Allowed => "allowed",
            Verdict::Learned => "learned",
            Verdict::Denied => "denied",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides per request whether an origin is admitted, learning in development.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    registry: Arc<OriginRegistry>,
    posture: Posture,
}

impl AdmissionController {
    pub fn new(registry: Arc<OriginRegistry>, posture: Posture) -> Self {
        Self { registry, posture }
    }

    pub fn registry(&self) -> &Arc<OriginRegistry> {
        &self.registry
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    pub fn admit(&self, origin: Option<&str>) -> Verdict {
        let Some(origin) = origin.filter(|origin| !origin.is_empty()) else {
            debug!("no origin presented, allowing request");
            return Verdict::NoOrigin;
        };

        if self.registry.is_allowed(origin) {
            debug!(origin, "origin allowed");
            return Verdict::Allowed;
        }

        if self.posture.learns_origins() {
            return match self.registry.learn(origin) {
                Ok(true) => {
                    info!(origin, "learning new origin in development");
                    Verdict::Learned
                }
                // Another request learned it first.
                Ok(false) => Verdict::Allowed,
                Err(err) => {
                    warn!(origin, error = %err, "origin admitted in development but not learned");
                    Verdict::Allowed
                }
            };
        }

        warn!(origin, "blocked origin");
        Verdict::Denied
    }

    /// Store an origin inferred from `Referer` or `Host` on a request that
    /// carried no `Origin`. Development only; returns `true` when newly stored.
    pub fn learn_detected(&self, detected: &str) -> bool {
        if !self.posture.learns_origins() || self.registry.is_allowed(detected) {
            return false;
        }

        match self.registry.learn(detected) {
            Ok(true) => {
                info!(origin = detected, "learning detected origin in development");
                true
            }
            Ok(false) => false,
            Err(err) => {
                debug!(origin = detected, error = %err, "detected origin not learned");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "admission_test.rs"]
mod admission_test;
