//! API middleware.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, Response};
use axum::middleware::Next;
use axum::response::IntoResponse;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn, Span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::metrics;

const DEFAULT_RPS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Idle client entries are dropped every this many checks.
const PRUNE_INTERVAL: u64 = 1024;

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Paths too noisy to log on every hit.
const QUIET_PATHS: &[&str] = &["/health", "/healthz", "/ready", "/metrics"];

/// Per-client token buckets for the `/api` routes.
pub struct ClientRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    trust_proxy_headers: bool,
    checks: AtomicU64,
}

impl ClientRateLimiter {
    /// A zero `rps` uses the default of 10, a zero burst falls back to `rps`.
    pub fn new(requests_per_second: u32, burst: u32, trust_proxy_headers: bool) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(DEFAULT_RPS);
        let burst = NonZeroU32::new(burst).unwrap_or(rps);
        Self {
            limiter: RateLimiter::keyed(Quota::per_second(rps).allow_burst(burst)),
            trust_proxy_headers,
            checks: AtomicU64::new(0),
        }
    }

    /// Take one token for `ip`. Returns false when the client is over quota.
    pub fn check(&self, ip: IpAddr) -> bool {
        let allowed = self.limiter.check_key(&ip).is_ok();
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_INTERVAL == PRUNE_INTERVAL - 1 {
            self.limiter.retain_recent();
        }
        allowed
    }

    /// The address requests are keyed on.
    ///
    /// The socket peer is used unless proxy headers are trusted. A trusted
    /// proxy appends the address it saw, so the last `X-Forwarded-For` entry
    /// is taken rather than the client-controlled first one.
    pub fn client_ip<B>(&self, request: &Request<B>) -> Option<IpAddr> {
        if self.trust_proxy_headers {
            if let Some(ip) = forwarded_ip(request.headers()) {
                return Some(ip);
            }
        }
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header_str = |name: &HeaderName| headers.get(name).and_then(|v| v.to_str().ok());

    header_str(&X_FORWARDED_FOR)
        .and_then(|chain| chain.rsplit(',').next())
        .or_else(|| header_str(&X_REAL_IP))
        .and_then(|ip| ip.trim().parse().ok())
}

/// Reject clients over their quota with 429 and `Retry-After`.
///
/// Requests with no resolvable client address are let through.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<ClientRateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let Some(ip) = limiter.client_ip(&request) else {
        return next.run(request).await;
    };

    if limiter.check(ip) {
        return next.run(request).await;
    }

    warn!(%ip, "Rate limit exceeded");
    metrics::record_rate_limit_hit(metrics::route_label(&request));
    let mut response = ApiError::RateLimited.into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
    response
}

/// CORS for the browser client. `*` allows any origin without credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().max_age(Duration::from_secs(600));

    if origins.iter().any(|o| o == "*") {
        return layer
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    // Credentials cannot be combined with wildcard headers
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("permissions-policy", "camera=(), geolocation=(), microphone=(), payment=()"),
];

/// Add the fixed security headers to every response.
pub async fn security_headers(request: Request<Body>, next: Next) -> Response<Body> {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        );
    }
    response
}

/// Propagate or mint an `X-Request-ID` and echo it on the response.
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response<Body> {
    let id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", id.as_str());
    request.extensions_mut().insert(id.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}

/// Log method, URI, status and latency of each request.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    if !QUIET_PATHS.contains(&uri.path()) {
        info!(
            %method,
            %uri,
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_from(peer: [u8; 4], forwarded_for: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(chain) = forwarded_for {
            builder = builder.header("X-Forwarded-For", chain);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((peer, 40000))));
        request
    }

    #[test]
    fn test_burst_then_limited() {
        let limiter = ClientRateLimiter::new(1, 3, false);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        for _ in 0..3 {
            assert!(limiter.check(ip));
        }
        assert!(!limiter.check(ip));

        // Other clients have their own budget
        assert!(limiter.check("10.0.0.2".parse().unwrap()));
    }

    #[test]
    fn test_forwarded_headers_ignored_by_default() {
        let limiter = ClientRateLimiter::new(1, 2, false);

        let request = request_from([192, 0, 2, 10], Some("203.0.113.7"));
        assert_eq!(limiter.client_ip(&request), Some("192.0.2.10".parse().unwrap()));

        // Rotating the header does not buy a fresh budget
        let allowed = (0..5)
            .map(|i| request_from([192, 0, 2, 10], Some(&format!("198.51.100.{}", i))))
            .filter(|r| limiter.client_ip(r).is_some_and(|ip| limiter.check(ip)))
            .count();
        assert_eq!(allowed, 2);
    }

    #[test]
    fn test_trusted_proxy_uses_last_hop() {
        let limiter = ClientRateLimiter::new(1, 2, true);

        let request = request_from([10, 0, 0, 1], Some("1.2.3.4, 203.0.113.7"));
        assert_eq!(limiter.client_ip(&request), Some("203.0.113.7".parse().unwrap()));

        let request = request_from([10, 0, 0, 1], None);
        assert_eq!(limiter.client_ip(&request), Some("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_no_peer_no_key() {
        let limiter = ClientRateLimiter::new(1, 2, false);
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(limiter.client_ip(&request), None);
    }
}
