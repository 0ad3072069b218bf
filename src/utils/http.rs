//! Client address and agent extraction.

use actix_web::HttpRequest;

/// Proxy headers checked in order before the socket peer address.
const CLIENT_IP_HEADERS: [&str; 4] = ["X-Forwarded-For", "X-Real-IP", "CF-Connecting-IP", "Forwarded-For"];

/// Client IP as reported by the first populated proxy header (first hop of a
/// comma-separated list), falling back to the peer address, then `unknown`.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| !ip.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            req.connection_info()
                .peer_addr()
                .unwrap_or("unknown")
                .to_string()
        })
}

pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
