// ABOUTME: Static API key middleware for the jotter HTTP API.
// ABOUTME: Checks the X-API-Key header on /notes and /tasks routes, exempts everything else.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};

/// A tower Layer that applies API key authentication to the record routes.
#[derive(Clone)]
pub struct ApiKeyLayer {
    key: Arc<String>,
}

impl ApiKeyLayer {
    /// Create a new ApiKeyLayer with the expected key.
    pub fn new(key: String) -> Self {
        Self { key: Arc::new(key) }
    }
}

impl<S> Layer<S> for ApiKeyLayer {
    type Service = ApiKeyMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyMiddleware {
            inner,
            key: Arc::clone(&self.key),
        }
    }
}

/// The middleware service that checks X-API-Key on /notes and /tasks routes.
#[derive(Clone)]
pub struct ApiKeyMiddleware<S> {
    inner: S,
    key: Arc<String>,
}

fn is_guarded(path: &str) -> bool {
    path == "/notes"
        || path.starts_with("/notes/")
        || path == "/tasks"
        || path.starts_with("/tasks/")
}

impl<S> Service<Request<Body>> for ApiKeyMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if !is_guarded(req.uri().path()) {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        // Constant-time comparison; a missing or non-ASCII header never matches
        let authorized = req
            .headers()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(|provided| bool::from(provided.as_bytes().ct_eq(self.key.as_bytes())))
            .unwrap_or(false);

        if authorized {
            let mut inner = self.inner.clone();
            Box::pin(async move { inner.call(req).await })
        } else {
            Box::pin(async move {
                let body = serde_json::json!({ "error": "unauthorized (X-API-Key)" });
                let resp = Response::builder()
                    .status(StatusCode::UNAUTHORIZED)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap();
                Ok(resp)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route("/notes", get(|| async { "notes" }))
            .route("/notes/{id}", get(|| async { "one note" }))
            .route("/tasks", get(|| async { "tasks" }))
            .route("/health", get(|| async { "ok" }))
            .layer(ApiKeyLayer::new("test-key-123".to_string()))
    }

    #[tokio::test]
    async fn rejects_without_key() {
        let app = test_router();

        let resp = app
            .oneshot(Request::get("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn allows_with_valid_key() {
        let app = test_router();

        let resp = app
            .oneshot(
                Request::get("/notes")
                    .header("x-api-key", "test-key-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_with_wrong_key() {
        let app = test_router();

        let resp = app
            .oneshot(
                Request::get("/tasks")
                    .header("x-api-key", "wrong-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn guards_item_routes() {
        let app = test_router();

        let resp = app
            .oneshot(Request::get("/notes/7").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn exempts_health() {
        let app = test_router();

        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn does_not_guard_lookalike_prefixes() {
        let app = Router::new()
            .route("/notesworthy", get(|| async { "unrelated" }))
            .layer(ApiKeyLayer::new("test-key-123".to_string()));

        let resp = app
            .oneshot(Request::get("/notesworthy").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unauthorized_body_is_json() {
        let app = test_router();

        let resp = app
            .oneshot(Request::get("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(
            json["error"].as_str().unwrap().contains("X-API-Key"),
            "body should name the expected header"
        );
    }
}
