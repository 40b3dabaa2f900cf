//! HTTP to HTTPS redirect middleware.
//!
//! Runs ahead of route dispatch for every path. A request that arrived over
//! plain HTTP gets a `307 Temporary Redirect` to the same path and query on
//! the HTTPS equivalent of the host. Requests already on HTTPS (signalled by
//! `x-forwarded-proto`) pass through untouched.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::AppState;
use crate::metrics;

/// Header set by TLS-terminating proxies to carry the original scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Redirect plain-HTTP requests to their HTTPS equivalent.
pub async fn https_redirect(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    if is_https(&req) {
        let response = next.run(req).await;
        metrics::record_request_latency(start);
        return response;
    }

    match https_location(&req, state.https_port) {
        Some(location) => {
            debug!("redirecting {} to {}", req.uri(), location);
            metrics::inc_redirects_issued();
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
        // Without a Host header there is no target to build; let the
        // request through rather than fail it.
        None => {
            let response = next.run(req).await;
            metrics::record_request_latency(start);
            response
        }
    }
}

/// Whether the request arrived over HTTPS.
fn is_https(req: &Request) -> bool {
    req.headers()
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}

/// Build the HTTPS `Location` target for a plain-HTTP request.
///
/// The default HTTPS port (443) is elided from the target.
fn https_location(req: &Request, https_port: u16) -> Option<String> {
    let host = req.headers().get(header::HOST)?.to_str().ok()?;

    // Strip an explicit port, keeping bracketed IPv6 hosts intact.
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };

    let path_and_query = req
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());

    if https_port == 443 {
        Some(format!("https://{host}{path_and_query}"))
    } else {
        Some(format!("https://{host}:{https_port}{path_and_query}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use pretty_assertions::assert_eq;

    fn request(uri: &str, host: Option<&str>) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header(header::HOST, host);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn location_elides_default_port() {
        let req = request("/reveal-secret", Some("example.com"));
        assert_eq!(
            https_location(&req, 443),
            Some("https://example.com/reveal-secret".to_string())
        );
    }

    #[test]
    fn location_keeps_custom_port() {
        let req = request("/reveal-secret", Some("example.com"));
        assert_eq!(
            https_location(&req, 8443),
            Some("https://example.com:8443/reveal-secret".to_string())
        );
    }

    #[test]
    fn location_strips_source_port() {
        let req = request("/reveal-secret", Some("example.com:8080"));
        assert_eq!(
            https_location(&req, 443),
            Some("https://example.com/reveal-secret".to_string())
        );
    }

    #[test]
    fn location_preserves_query() {
        let req = request("/reveal-secret?a=1&b=2", Some("example.com"));
        assert_eq!(
            https_location(&req, 443),
            Some("https://example.com/reveal-secret?a=1&b=2".to_string())
        );
    }

    #[test]
    fn location_keeps_bracketed_ipv6_host() {
        let req = request("/", Some("[::1]:8080"));
        assert_eq!(https_location(&req, 443), Some("https://[::1]/".to_string()));
    }

    #[test]
    fn location_requires_host_header() {
        let req = request("/reveal-secret", None);
        assert_eq!(https_location(&req, 443), None);
    }

    #[test]
    fn forwarded_proto_marks_https() {
        let mut req = request("/", Some("example.com"));
        req.headers_mut()
            .insert(FORWARDED_PROTO, "https".parse().unwrap());
        assert!(is_https(&req));
    }

    #[test]
    fn missing_proto_means_plain_http() {
        let req = request("/", Some("example.com"));
        assert!(!is_https(&req));
    }
}
