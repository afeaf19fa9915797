//! Request metrics middleware.

use crate::{services::AppMetrics, utils::route::extract_route_pattern};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Instant,
};

/// Records count and latency of every request into the given [`AppMetrics`]
pub struct MetricsMiddleware {
    metrics: web::Data<AppMetrics>,
}

impl MetricsMiddleware {
    pub fn new(metrics: web::Data<AppMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService {
            service,
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsService<S> {
    service: S,
    metrics: web::Data<AppMetrics>,
}

/// What is known about a request before it reaches the router
struct RequestTimer {
    method: Method,
    started: Instant,
}

impl RequestTimer {
    fn start(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().clone(),
            started: Instant::now(),
        }
    }

    /// The matched pattern is only available once routing has happened, so
    /// the route label is read off the response's request
    fn finish<B>(self, metrics: &AppMetrics, res: &ServiceResponse<B>) {
        metrics.record_request(
            self.method.as_str(),
            &extract_route_pattern(res.request()),
            res.status().as_u16(),
            self.started.elapsed(),
        );
    }
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let timer = RequestTimer::start(&req);
        let metrics = self.metrics.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            timer.finish(&metrics, &res);
            Ok(res)
        })
    }
}
