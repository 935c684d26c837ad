// tavola-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-process calls into an axum Router
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{HttpClient, TokenSlot, decode_response};
use crate::{ClientError, ClientResult};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives the Router with Tower's `oneshot`, so an embedded backend or a
/// test double answers without a socket. Responses go through the same
/// envelope normalization as [`super::NetworkHttpClient`].
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use tavola_client::OneshotHttpClient;
///
/// let router: Router = build_backend();
/// let client = OneshotHttpClient::new(router);
/// let branches: Paginated<Branch> = client.get("/branches?page=1&limit=10").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: TokenSlot,
}

impl OneshotHttpClient {
    /// Create a client over an initialised Router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: TokenSlot::default(),
        }
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let uri = format!("/{}", path.trim_start_matches('/'));
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = self.token.auth_header() {
            builder = builder.header(http::header::AUTHORIZATION, auth);
        }

        let body = match body {
            Some(bytes) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {e}")))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        tracing::debug!(method = %request.method(), path = %request.uri(), "in-process request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {e}")))?;

        let status = response.status().as_u16();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {e}")))?;

        decode_response(status, &body_bytes)
    }

    async fn send_json<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(method, path, Some(bytes))?;
        self.execute(request).await
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, None)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::POST, path, body).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::POST, path, None)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::PUT, path, body).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::PATCH, path, body).await
    }

    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::PATCH, path, None)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, path, None)?;
        self.execute(request).await
    }

    fn token(&self) -> Option<String> {
        self.token.get()
    }

    fn set_token(&self, token: Option<String>) {
        self.token.set(token);
    }
}
