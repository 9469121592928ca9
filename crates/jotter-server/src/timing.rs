// ABOUTME: Response timing middleware stamping X-Process-Time on every response.
// ABOUTME: Measures wall-clock duration through the rest of the stack in milliseconds.

use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Stamp `X-Process-Time: <ms>ms` (two decimals) on the response.
pub async fn timing_header(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(req).await;

    let dur_ms = start.elapsed().as_secs_f64() * 1000.0;
    if let Ok(value) = HeaderValue::from_str(&format!("{dur_ms:.2}ms")) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-process-time"), value);
    }

    response
}
