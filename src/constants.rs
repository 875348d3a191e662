pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
    pub const ORIGIN: &str = "Origin";
    pub const REFERER: &str = "Referer";
    pub const REFERRER: &str = "Referrer";
    pub const HOST: &str = "Host";
    pub const X_FORWARDED_PROTO: &str = "X-Forwarded-Proto";
    pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";
    pub const USER_AGENT: &str = "User-Agent";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const VARY: &str = "Vary";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const OPTIONS: &str = "OPTIONS";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

/// Request headers a browser may send on admitted cross-origin calls.
pub const DEFAULT_ALLOWED_HEADERS: [&str; 5] = [
    "Origin",
    "X-Requested-With",
    "Content-Type",
    "Accept",
    "Authorization",
];

/// Origin families trusted without configuration: loopback and private IPv4.
///
/// Octets are not range checked, so `http://172.999.1.1` is admitted as well.
pub const DEFAULT_ORIGIN_PATTERNS: [&str; 5] = [
    r"^https?://localhost(:\d+)?$",
    r"^https?://127\.0\.0\.1(:\d+)?$",
    r"^https?://192\.168\.\d+\.\d+(:\d+)?$",
    r"^https?://10\.\d+\.\d+\.\d+(:\d+)?$",
    r"^https?://172\.\d+\.\d+\.\d+(:\d+)?$",
];

/// Ports local network origins are synthesized for when none are configured.
pub const DEFAULT_ORIGIN_PORTS: [u16; 2] = [8080, 3000];
