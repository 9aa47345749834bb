//! Bearer token extraction for mutating endpoints.

use actix_web::HttpRequest;
use actix_web::http::header;

/// The raw token presented on a request.
///
/// Reads the `Authorization` header and strips an optional `Bearer `
/// prefix; a raw token without the scheme is accepted as well. Absent
/// or non-UTF-8 headers yield an empty token, which downstream
/// verification rejects with the standard unauthorised message.
#[must_use]
pub fn presented_token(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
        .unwrap_or("")
}
