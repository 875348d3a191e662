//! Dynamic origin admission for the RMA intake API.
//!
//! Decides per request whether the calling origin may use the API: exact
//! allow-list entries, trusted loopback and private network patterns, local
//! network origins seeded at startup and, in development only, origins
//! learned on first sight.

pub mod admission;
pub mod audit;
pub mod config;
pub mod constants;
mod context;
pub mod detect;
pub mod error;
mod headers;
pub mod http;
pub mod network;
mod options;
pub mod pattern;
mod policy;
pub mod registry;

pub use admission::{AdmissionController, Posture, Verdict};
pub use audit::AccessRecord;
pub use config::{AdmissionConfig, build_registry};
pub use context::RequestContext;
pub use detect::detect_origin;
pub use error::{AdmissionError, ConfigError};
pub use headers::Headers;
pub use network::{NetworkSummary, SynthesisInput, synthesize_origins};
pub use options::CorsOptions;
pub use pattern::{OriginPattern, PatternError, default_patterns};
pub use policy::{CorsDecision, CorsEvaluation, CorsPolicy, Rejection, content_security_policy};
pub use registry::OriginRegistry;
