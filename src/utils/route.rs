//! Route label extraction for metrics.

use actix_web::HttpRequest;

/// The matched route template (`/api/members/{identifier}/portfolio/pdf`)
/// so per-member paths share one label; unmatched requests collapse into
/// `/unknown`.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "/unknown".to_string())
}
