// tavola-client/src/client/http.rs
// HTTP transport - network implementation and envelope normalization

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use shared::ApiResponse;

use crate::config::ClientConfig;
use crate::{ClientError, ClientResult};

/// Error body of a non-2xx response; the backend uses `error`,
/// some middleware answers with `message`
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a backend response into its payload.
///
/// - non-2xx: message from the JSON body, or `HTTP <status>`
/// - 2xx with `success: false`: [`ClientError::Api`]
/// - 2xx without `data`: decoded from `null` (works for `()` and `Option`)
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(ClientError::from_status(status, message));
    }

    if body.is_empty() {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| ClientError::InvalidResponse("Empty response body".into()));
    }

    let envelope: ApiResponse<T> = serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))?;

    match envelope.into_data().map_err(ClientError::Api)? {
        Some(data) => Ok(data),
        None => serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| ClientError::InvalidResponse("Missing response data".into())),
    }
}

/// Bearer token slot shared between a transport and its clones
#[derive(Debug, Clone, Default)]
pub struct TokenSlot(Arc<RwLock<Option<String>>>);

impl TokenSlot {
    pub fn new(token: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(token)))
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }

    pub fn set(&self, token: Option<String>) {
        *self.0.write() = token;
    }

    /// `Authorization` header value, when a token is held
    pub fn auth_header(&self) -> Option<String> {
        self.get().map(|t| format!("Bearer {}", t))
    }
}

/// HTTP transport trait
///
/// Every method returns the `data` of the backend envelope, already
/// normalized into [`ClientResult`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: Option<String>);
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: TokenSlot,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: TokenSlot::new(config.token.clone()),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        tracing::debug!(method = %method, path, "api request");
        let mut req = self.client.request(method, self.url(path));
        if let Some(auth) = self.token.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let response = req.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let result = decode_response(status, &bytes);
        if let Err(e) = &result {
            tracing::debug!(path, status, error = %e, "api request failed");
        }
        result
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::POST, path, None).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::PATCH, path, None).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::DELETE, path, None).await
    }

    fn token(&self) -> Option<String> {
        self.token.get()
    }

    fn set_token(&self, token: Option<String>) {
        self.token.set(token);
    }
}
