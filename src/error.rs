use thiserror::Error;

/// Errors raised by administrative changes to the allow-list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Domain is required")]
    MissingDomain,
    #[error("Invalid domain format: {domain} is not an absolute http or https URL")]
    InvalidDomainSubmission { domain: String },
}

/// Errors raised while reading startup configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {value:?} in {key}")]
    InvalidPort { key: &'static str, value: String },
    #[error("{key} must name at least one port")]
    EmptyPortList { key: &'static str },
    #[error("invalid bind address {value:?}")]
    InvalidBindAddress { value: String },
}
