// docvault-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-process calls into an axum Router

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Method, Request, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

use super::FileBody;
use super::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Oneshot HTTP client (in-memory)
///
/// Calls the Router through `tower::ServiceExt::oneshot`, so a server and
/// its client can share one process without a socket.
///
/// ```ignore
/// let state = docvault_server::AppState::new(&config).await?;
/// let client = OneshotHttpClient::new(docvault_server::create_router(state));
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Arc<RwLock<Option<String>>>,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached.
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: Arc::new(RwLock::new(None)),
        }
    }

    async fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = self.token.read().await.as_deref() {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(bytes) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {e}")))
    }

    /// Run the request; returns status-checked headers and body bytes.
    async fn execute(&self, request: Request<Body>) -> ClientResult<(HeaderMap, Vec<u8>)> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {e}")))?;

        let status = response.status();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(ClientError::from_response(status, &bytes));
        }
        Ok((parts.headers, bytes.to_vec()))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<T> {
        let request = self.build_request(method, path, body).await?;
        let (_, bytes) = self.execute(request).await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(format!("{e}")))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::GET, path, None).await
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<FileBody> {
        let request = self.build_request(Method::GET, path, None).await?;
        let (headers, bytes) = self.execute(request).await?;
        Ok(FileBody::from_parts(&headers, bytes))
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        self.call(Method::POST, path, Some(bytes)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::POST, path, None).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        self.call(Method::PUT, path, Some(bytes)).await
    }

    async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::PATCH, path, None).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.call(Method::DELETE, path, None).await
    }

    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }
}
