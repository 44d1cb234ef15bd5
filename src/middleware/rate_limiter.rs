use axum::{
    extract::ConnectInfo,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use governor::{DefaultDirectRateLimiter, DefaultKeyedRateLimiter, Quota, RateLimiter};
use opentelemetry::KeyValue;
use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::warn;

use crate::{config::Limits, utils::metrics, Settings};

fn quota(limits: Limits) -> Quota {
    Quota::per_second(limits.cells_per_second).allow_burst(limits.burst_per_second)
}

fn too_many_requests(kind: &'static str, body: &'static str) -> Response {
    metrics::REQUEST_COUNTER_429.add(1.0, &[KeyValue::new("kind", kind)]);
    warn!(kind, "request throttled");

    (StatusCode::TOO_MANY_REQUESTS, body).into_response()
}

/// Caps the request rate of the wrapped routes across all clients.
#[derive(Clone)]
pub struct GlobalRateLimitLayer {
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl GlobalRateLimitLayer {
    pub fn new(limits: Limits) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota(limits))),
        }
    }
}

impl<S> Layer<S> for GlobalRateLimitLayer {
    type Service = RateLimitMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitMiddleware {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitMiddleware<S> {
    inner: S,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimitMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if self.limiter.check().is_err() {
            let response = too_many_requests("global", "Too many requests");
            return Box::pin(async { Ok(response) });
        }

        Box::pin(self.inner.call(req))
    }
}

/// Caps the request rate per client address.
///
/// The address comes from the connection, or from `X-Forwarded-For` when the
/// service is configured to sit behind a proxy. Requests with no resolvable
/// address pass through.
#[derive(Clone)]
pub struct PerIpRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl PerIpRateLimiter {
    pub fn new(limits: Limits) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota(limits))),
        }
    }
}

impl<S> Layer<S> for PerIpRateLimiter {
    type Service = PerIpRateLimitMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PerIpRateLimitMiddleware {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct PerIpRateLimitMiddleware<S> {
    inner: S,
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

fn client_ip<ReqBody>(req: &Request<ReqBody>) -> Option<IpAddr> {
    let behind_proxy = req
        .extensions()
        .get::<Settings>()
        .is_some_and(|s| s.rate_limiter.x_forwarded_for);

    if behind_proxy {
        // leftmost entry is the original client
        req.headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    } else {
        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.ip())
    }
}

impl<S, ReqBody> Service<Request<ReqBody>> for PerIpRateLimitMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if let Some(ip_addr) = client_ip(&req) {
            if self.limiter.check_key(&ip_addr).is_err() {
                let response = too_many_requests("per_ip", "Too many requests per IP address");
                return Box::pin(async { Ok(response) });
            }
        }

        Box::pin(self.inner.call(req))
    }
}
