/// Request metadata the admission layer reads. Borrowed for one request only.
#[derive(Debug, Clone, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub referer: Option<&'a str>,
    pub host: Option<&'a str>,
    pub forwarded_proto: Option<&'a str>,
    /// Whether the connection to this server is TLS.
    pub encrypted: bool,
    pub client_ip: Option<&'a str>,
    pub user_agent: Option<&'a str>,
}
