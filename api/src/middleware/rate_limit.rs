//! Rate limiting middleware for API endpoints
//!
//! Every request is attributed to a client identity resolved from the
//! reverse proxy headers, classified into an admission tier by path,
//! and checked against the shared tiered limiter before it reaches the
//! handler. Rejected requests receive a 429 with a JSON body; admitted
//! requests carry `X-RateLimit-*` headers describing the remaining
//! budget.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorTooManyRequests,
    http::header::{HeaderMap, HeaderName, HeaderValue},
    Error,
};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use gk_core::domain::{resolve_identity, HeaderSource, Tier};
use gk_core::services::rate_limit::TieredRateLimiter;

/// Read-only view over request headers for identity resolution
struct RequestHeaders<'a>(&'a HeaderMap);

impl HeaderSource for RequestHeaders<'_> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Map a request path onto its admission tier
fn classify_tier(path: &str) -> Tier {
    if path.contains("/auth/") || path.ends_with("/auth") {
        Tier::Auth
    } else if path.contains("/upload") {
        Tier::Upload
    } else if path.starts_with("/api") {
        Tier::Api
    } else {
        Tier::Public
    }
}

/// Rate limiter middleware factory
pub struct RateLimiter {
    limiter: Arc<TieredRateLimiter>,
}

impl RateLimiter {
    /// Create a new middleware factory over a shared limiter
    pub fn new(limiter: Arc<TieredRateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<TieredRateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = self.limiter.clone();

        Box::pin(async move {
            let tier = classify_tier(req.path());
            let identity = resolve_identity(&RequestHeaders(req.headers()));
            let decision = limiter.check(&identity, tier).await;

            if !decision.allowed {
                return Err(ErrorTooManyRequests(json!({
                    "error": "rate_limit_exceeded",
                    "message": "Too many requests, please slow down",
                    "limit": decision.limit,
                    "remaining": decision.remaining,
                    "reset_at": decision.reset_at.to_rfc3339(),
                    "retry_after_seconds": decision.retry_after_seconds(Utc::now()),
                })));
            }

            let mut res = service.call(req).await?;

            // Degraded decisions carry a sentinel budget; advertising
            // it would mislead clients, so the headers are omitted.
            if !decision.is_degraded() {
                let headers = res.headers_mut();
                headers.insert(
                    HeaderName::from_static("x-ratelimit-limit"),
                    HeaderValue::from(decision.limit),
                );
                headers.insert(
                    HeaderName::from_static("x-ratelimit-remaining"),
                    HeaderValue::from(decision.remaining),
                );
                headers.insert(
                    HeaderName::from_static("x-ratelimit-reset"),
                    HeaderValue::from(decision.reset_at.timestamp()),
                );
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_paths_classify_as_auth() {
        assert_eq!(classify_tier("/api/v1/auth/login"), Tier::Auth);
        assert_eq!(classify_tier("/api/v1/auth"), Tier::Auth);
        assert_eq!(classify_tier("/auth/refresh"), Tier::Auth);
    }

    #[test]
    fn test_upload_paths_classify_as_upload() {
        assert_eq!(classify_tier("/api/v1/upload"), Tier::Upload);
        assert_eq!(classify_tier("/upload/images"), Tier::Upload);
    }

    #[test]
    fn test_api_paths_classify_as_api() {
        assert_eq!(classify_tier("/api/v1/orders"), Tier::Api);
        assert_eq!(classify_tier("/api"), Tier::Api);
    }

    #[test]
    fn test_everything_else_is_public() {
        assert_eq!(classify_tier("/"), Tier::Public);
        assert_eq!(classify_tier("/health"), Tier::Public);
        assert_eq!(classify_tier("/docs/authoring"), Tier::Public);
    }
}
