use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info};

pub const VERSION_HEADER: &str = "x-jobboard-version";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request processing middleware hook
///
/// Logs every request with its status and how long it took.
pub async fn request_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    debug!("Processing {} {}", method, uri);

    let response = next.run(request).await;

    info!(
        "{} {} -> {} in {:?}",
        method,
        uri.path(),
        response.status().as_u16(),
        start.elapsed()
    );

    response
}

/// Response processing middleware hook
///
/// Stamps every response with the API version.
pub async fn response_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response
        .headers_mut()
        .insert(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(API_VERSION),
        );

    response
}
