//! Local network origin synthesis.
//!
//! Runs once at startup. Only local interface queries are made; nothing here
//! touches the network or fails startup.

use indexmap::IndexSet;
use std::net::{IpAddr, Ipv4Addr};
use tracing::{info, warn};

const PREFERRED_RANGES: [&str; 7] = [
    "192.168.", "10.", "172.16.", "172.17.", "172.18.", "172.19.", "172.20.",
];

/// Inputs for [`synthesize_origins`].
#[derive(Debug, Clone, Default)]
pub struct SynthesisInput<'a> {
    pub ports: &'a [u16],
    pub frontend_url: Option<&'a str>,
    pub custom_origins: Option<&'a str>,
}

/// Every non-loopback IPv4 address on the active interfaces.
pub fn local_ipv4_addresses() -> Vec<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .into_iter()
            .filter(|iface| !iface.is_loopback())
            .filter_map(|iface| match iface.ip() {
                IpAddr::V4(addr) => Some(addr),
                IpAddr::V6(_) => None,
            })
            .collect(),
        Err(err) => {
            warn!(error = %err, "could not enumerate network interfaces");
            Vec::new()
        }
    }
}

/// Candidate origins for the local machine, seeded into the allow-list at startup.
pub fn synthesize_origins(input: &SynthesisInput<'_>) -> IndexSet<String> {
    synthesize_origins_from(&local_ipv4_addresses(), input)
}

pub fn synthesize_origins_from(
    addresses: &[Ipv4Addr],
    input: &SynthesisInput<'_>,
) -> IndexSet<String> {
    let mut origins = IndexSet::new();

    for port in input.ports {
        origins.insert(format!("http://localhost:{port}"));
        origins.insert(format!("http://127.0.0.1:{port}"));
    }

    for address in addresses.iter().filter(|address| !address.is_loopback()) {
        for port in input.ports {
            origins.insert(format!("http://{address}:{port}"));
        }
    }

    if let Some(frontend) = input.frontend_url.map(str::trim)
        && !frontend.is_empty()
    {
        origins.insert(frontend.to_owned());
    }

    if let Some(custom) = input.custom_origins {
        origins.extend(split_list(custom));
    }

    origins
}

/// The address most likely to be reachable from other machines on the LAN.
pub fn primary_address(addresses: &[Ipv4Addr]) -> String {
    let rendered: Vec<String> = addresses.iter().map(ToString::to_string).collect();

    PREFERRED_RANGES
        .iter()
        .find_map(|range| rendered.iter().find(|ip| ip.starts_with(range)))
        .or_else(|| rendered.iter().find(|ip| !ip.starts_with("172.")))
        .or_else(|| rendered.first())
        .cloned()
        .unwrap_or_else(|| "localhost".to_owned())
}

/// Split a comma separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
}

/// What the server found on the local machine at startup.
#[derive(Debug, Clone)]
pub struct NetworkSummary {
    pub primary_ip: String,
    pub addresses: Vec<Ipv4Addr>,
    pub origins: IndexSet<String>,
}

impl NetworkSummary {
    pub fn collect(input: &SynthesisInput<'_>) -> Self {
        let addresses = local_ipv4_addresses();
        Self::from_addresses(addresses, input)
    }

    pub fn from_addresses(addresses: Vec<Ipv4Addr>, input: &SynthesisInput<'_>) -> Self {
        Self {
            primary_ip: primary_address(&addresses),
            origins: synthesize_origins_from(&addresses, input),
            addresses,
        }
    }

    pub fn log(&self) {
        let available = self
            .addresses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let generated = self.origins.iter().cloned().collect::<Vec<_>>().join(", ");

        info!(primary_ip = %self.primary_ip, "network information");
        info!(available_ips = %available, "local IPv4 addresses");
        info!(origins = %generated, "generated origins");
    }
}

#[cfg(test)]
#[path = "network_test.rs"]
mod network_test;
