//! Best-effort origin detection from request headers.
//!
//! Every function here is total: malformed input yields `None`, never an error.

use crate::context::RequestContext;
use url::Url;

/// Derive the calling origin, preferring `Origin`, then `Referer`, then `Host`.
///
/// A header that is present but does not parse ends detection with `None`
/// rather than falling through to the next source.
pub fn detect_origin(request: &RequestContext<'_>) -> Option<String> {
    if let Some(origin) = non_empty(request.origin) {
        return origin_of(origin);
    }

    if let Some(referer) = non_empty(request.referer) {
        return origin_of(referer);
    }

    let host = non_empty(request.host)?;
    let protocol = non_empty(request.forwarded_proto)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(if request.encrypted { "https" } else { "http" });

    Some(format!("{protocol}://{host}"))
}

/// The `Origin` header as sent, when it parses as an absolute URL.
pub fn request_origin<'a>(request: &RequestContext<'a>) -> Option<&'a str> {
    non_empty(request.origin).filter(|origin| origin_of(origin).is_some())
}

/// Serialized `scheme://host[:port]` of `value`, or `None` for unparsable or opaque origins.
pub fn origin_of(value: &str) -> Option<String> {
    let url = Url::parse(value.trim()).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// True for absolute URLs with an `http` or `https` scheme.
pub fn is_web_origin(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[path = "detect_test.rs"]
mod detect_test;
