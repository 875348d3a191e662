use crate::constants::{DEFAULT_ALLOWED_HEADERS, method};

/// Response header configuration for admitted origins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsOptions {
    pub methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub credentials: bool,
    pub preflight_status: u16,
    /// Attach a `Content-Security-Policy` naming the admitted origin.
    pub content_security_policy: bool,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            methods: vec![
                method::GET.into(),
                method::POST.into(),
                method::PUT.into(),
                method::DELETE.into(),
                method::OPTIONS.into(),
            ],
            allowed_headers: DEFAULT_ALLOWED_HEADERS.iter().map(|h| h.to_string()).collect(),
            credentials: true,
            preflight_status: 200,
            content_security_policy: true,
        }
    }
}

impl CorsOptions {
    pub(crate) fn methods_value(&self) -> Option<String> {
        (!self.methods.is_empty()).then(|| self.methods.join(","))
    }

    pub(crate) fn allowed_headers_value(&self) -> Option<String> {
        (!self.allowed_headers.is_empty()).then(|| self.allowed_headers.join(", "))
    }
}
