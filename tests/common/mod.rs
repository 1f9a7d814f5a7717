#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use flashcards_api::identity::generate_identity_token;
use flashcards_api::store::{DocumentStore, MemoryStore, USERS};

/// In-process app over a shared MemoryStore, so tests can assert on the
/// documents behind the API responses.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = flashcards_api::app(store.clone());
        Self { router, store }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    /// Mint a bearer token the way the platform's auth subsystem would.
    pub fn token(&self, uid: &str) -> String {
        generate_identity_token(uid, Some(&format!("{uid}@example.com")))
            .expect("failed to mint test token")
    }

    /// Send a JSON request with an optional bearer token.
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: &Value,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        self.request(req).await
    }

    /// Provision a profile through the signup hook, as the platform would
    /// on account creation.
    pub async fn signup(&self, uid: &str, email: &str) {
        let resp = self
            .send_json(
                "POST",
                "/hooks/signup",
                &serde_json::json!({ "uid": uid, "email": email }),
                None,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK, "signup hook failed");
    }

    /// Read a user profile document straight from the store.
    pub async fn profile(&self, uid: &str) -> Value {
        self.store
            .get(USERS, uid)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("no profile document for {uid}"))
    }
}

/// Parse a response body as JSON.
pub async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert an error response: status, machine-readable kind, exact message.
pub async fn assert_api_error(resp: Response, status: StatusCode, code: &str, message: &str) {
    assert_eq!(resp.status(), status);
    let body = body_json(resp).await;
    assert_eq!(body["error"], true, "expected error body: {body}");
    assert_eq!(body["code"], code, "wrong error code: {body}");
    assert_eq!(body["message"], message, "wrong error message: {body}");
}
