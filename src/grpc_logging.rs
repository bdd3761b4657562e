use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{Request, Response};
use tower::{Layer, Service};
use tracing::{info, warn};

/// Split a gRPC request path (`/package.Service/Method`) into service and
/// method names.
pub fn parse_grpc_path(path: &str) -> (&str, &str) {
    let trimmed = path.trim_start_matches('/');
    match trimmed.split_once('/') {
        Some((service, method)) if !service.is_empty() && !method.is_empty() => (service, method),
        _ => ("unknown", "unknown"),
    }
}

/// A Tower layer that logs every gRPC call with its status and latency.
#[derive(Clone, Copy)]
pub struct GrpcLoggingLayer;

impl<S> Layer<S> for GrpcLoggingLayer {
    type Service = GrpcLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GrpcLoggingService { inner }
    }
}

#[derive(Clone)]
pub struct GrpcLoggingService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for GrpcLoggingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let (service, method) = parse_grpc_path(req.uri().path());
        let (service, method) = (service.to_string(), method.to_string());

        // Take the ready service and leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            let result = inner.call(req).await;
            let duration_ms = start.elapsed().as_millis();

            match &result {
                Ok(response) => {
                    // Trailers-only responses put grpc-status in the headers;
                    // otherwise it arrives in trailers and reads as "0" here.
                    let status = response
                        .headers()
                        .get("grpc-status")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("0");
                    if status == "0" {
                        info!(
                            grpc.service = %service,
                            grpc.method = %method,
                            duration_ms = %duration_ms,
                            "gRPC call completed"
                        );
                    } else {
                        warn!(
                            grpc.service = %service,
                            grpc.method = %method,
                            grpc.status = %status,
                            duration_ms = %duration_ms,
                            "gRPC call returned error status"
                        );
                    }
                }
                Err(_) => {
                    warn!(
                        grpc.service = %service,
                        grpc.method = %method,
                        duration_ms = %duration_ms,
                        "gRPC call failed in transport"
                    );
                }
            }

            result
        })
    }
}
