//! Shared HTTP contract for the URL shortener client workspace.
//!
//! Holds the paths and headers the shortening service expects, plus the small
//! URL-building helpers used by the domain services and the transport adapter.

use http::StatusCode;

// ============================================================================
// Service Contract
// ============================================================================

/// Path of the link shortening endpoint (`POST`, JSON body `{"url": ...}`).
pub const SHORTEN_PATH: &str = "/api/";

/// Path of the backend status endpoint (`GET`).
pub const STATUS_PATH: &str = "/api/status";

/// Content type sent with every JSON request body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Path segment between the base URL and the short code in a composed link.
pub const SHORT_LINK_SEGMENT: &str = "s";

// ============================================================================
// URL Building
// ============================================================================

/// Resolve an absolute service path against an origin.
///
/// A single trailing `/` on the origin is dropped so that
/// `join_endpoint("http://host/", "/api/")` yields `http://host/api/`.
pub fn join_endpoint(origin: &str, path: &str) -> String {
    let origin = origin.strip_suffix('/').unwrap_or(origin);
    if path.starts_with('/') {
        format!("{}{}", origin, path)
    } else {
        format!("{}/{}", origin, path)
    }
}

/// Build the user-facing short link from a base URL and a service short code.
///
/// The result is exactly `<base>/s/<short>`; the base is used verbatim.
pub fn build_short_link(base_url: &str, short: &str) -> String {
    format!("{}/{}/{}", base_url, SHORT_LINK_SEGMENT, short)
}

/// Canonical reason phrase for a status code, or an empty string when the
/// code has none (mirrors what a browser exposes as `statusText`).
pub fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
        .to_string()
}

/// Return true when `s` starts with an `http://` or `https://` scheme.
pub fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
