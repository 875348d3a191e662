//! Startup configuration read from the environment.
//!
//! | variable          | meaning                                             | default      |
//! |-------------------|-----------------------------------------------------|--------------|
//! | `APP_ENV`         | `development` enables origin learning               | `production` |
//! | `PORT`            | listen port                                         | `3000`       |
//! | `BIND_ADDRESS`    | listen address                                      | `0.0.0.0`    |
//! | `CORS_PORTS`      | ports local network origins are generated for       | `8080,3000`  |
//! | `FRONTEND_URL`    | origin of the deployed frontend                     | unset        |
//! | `CUSTOM_ORIGINS`  | extra origins, comma separated                      | unset        |
//! | `ALLOWED_DOMAINS` | pre-approved origins, comma separated               | unset        |
//! | `ADMIN_TOKEN`     | bearer token guarding `/api/cors`                   | unset        |

use crate::admission::Posture;
use crate::constants::DEFAULT_ORIGIN_PORTS;
use crate::error::ConfigError;
use crate::network::{NetworkSummary, SynthesisInput, split_list};
use crate::registry::OriginRegistry;
use std::env;
use std::net::IpAddr;
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionConfig {
    pub posture: Posture,
    pub port: u16,
    pub bind_address: IpAddr,
    pub origin_ports: Vec<u16>,
    pub frontend_url: Option<String>,
    pub custom_origins: Option<String>,
    pub allowed_domains: Vec<String>,
    pub admin_token: Option<String>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            posture: Posture::Production,
            port: DEFAULT_PORT,
            bind_address: IpAddr::from([0, 0, 0, 0]),
            origin_ports: DEFAULT_ORIGIN_PORTS.to_vec(),
            frontend_url: None,
            custom_origins: None,
            allowed_domains: Vec::new(),
            admin_token: None,
        }
    }
}

impl AdmissionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let posture = match var("APP_ENV") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(error = %err, "falling back to production posture");
                Posture::Production
            }),
            None => Posture::Production,
        };

        let port = match var("PORT") {
            Some(raw) => parse_port("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let bind_raw = var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());
        let bind_address: IpAddr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress { value: bind_raw.clone() })?;

        let origin_ports = match var("CORS_PORTS") {
            Some(raw) => parse_port_list("CORS_PORTS", &raw)?,
            None => DEFAULT_ORIGIN_PORTS.to_vec(),
        };

        Ok(Self {
            posture,
            port,
            bind_address,
            origin_ports,
            frontend_url: var("FRONTEND_URL").map(|value| value.trim().to_owned()),
            custom_origins: var("CUSTOM_ORIGINS"),
            allowed_domains: var("ALLOWED_DOMAINS")
                .map(|raw| split_list(&raw).collect())
                .unwrap_or_default(),
            admin_token: var("ADMIN_TOKEN"),
        })
    }

    pub fn synthesis_input(&self) -> SynthesisInput<'_> {
        SynthesisInput {
            ports: &self.origin_ports,
            frontend_url: self.frontend_url.as_deref(),
            custom_origins: self.custom_origins.as_deref(),
        }
    }

    /// Log the posture, loudly when origin learning is on.
    pub fn announce(&self) {
        info!(posture = %self.posture, port = self.port, "admission configuration loaded");
        if self.posture.learns_origins() {
            warn!("APP_ENV=development: every well-formed origin will be trusted and learned; never run this posture in production");
        }
    }
}

/// Build the allow-list: default patterns, the origins synthesized for the
/// local network and the pre-approved domains from `config`.
pub fn build_registry(config: &AdmissionConfig, network: &NetworkSummary) -> OriginRegistry {
    let registry = OriginRegistry::new();
    let synthesized = registry.extend(&network.origins);
    let configured = registry.extend(&config.allowed_domains);
    info!(synthesized, configured, total = registry.len(), "allow-list seeded");
    registry
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
        key,
        value: raw.to_owned(),
    })
}

fn parse_port_list(key: &'static str, raw: &str) -> Result<Vec<u16>, ConfigError> {
    let ports = split_list(raw)
        .map(|entry| parse_port(key, &entry))
        .collect::<Result<Vec<_>, _>>()?;
    if ports.is_empty() {
        return Err(ConfigError::EmptyPortList { key });
    }
    Ok(ports)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
