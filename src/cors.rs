use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Local frontend dev servers allowed when no origins are configured.
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:3001,http://localhost:5173,http://127.0.0.1:3000";

/// Whether `origin` matches one of `allowed`.
///
/// An entry matches the same origin exactly, or with any port when the
/// entry itself has none (`http://localhost` allows `http://localhost:8080`).
/// `"*"` allows everything.
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| {
        entry == "*"
            || entry == origin
            || origin
                .strip_prefix(entry.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                .is_some_and(|port| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()))
    })
}

/// Build a CORS layer for gRPC-Web with the given allowed origins.
pub fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .is_ok_and(|origin| origin_allowed(origin, &cors_origins))
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        DEFAULT_CORS_ORIGINS.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_default_dev_origins_allowed() {
        assert!(origin_allowed("http://localhost:3000", &defaults()));
        assert!(origin_allowed("http://localhost:5173", &defaults()));
        assert!(!origin_allowed("http://localhost:8080", &defaults()));
    }

    #[test]
    fn test_entry_without_port_allows_any_port() {
        let allowed = vec!["https://listings.example.com".to_string()];
        assert!(origin_allowed("https://listings.example.com", &allowed));
        assert!(origin_allowed("https://listings.example.com:8443", &allowed));
    }

    #[test]
    fn test_prefix_lookalike_rejected() {
        let allowed = vec!["http://localhost".to_string()];
        assert!(!origin_allowed("http://localhost.evil.test", &allowed));
        assert!(!origin_allowed("http://localhost:", &allowed));
    }

    #[test]
    fn test_wildcard() {
        assert!(origin_allowed("https://anything.test", &["*".to_string()]));
    }
}
