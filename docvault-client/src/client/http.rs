// docvault-client/src/client/http.rs
// HTTP client over the network

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::FileBody;
use crate::{ClientError, ClientResult};

/// HTTP transport trait
///
/// Paths are absolute API paths (`/api/...`), query string included.
/// Success bodies are the flattened `{ success: true, ... }` envelope;
/// failures come back as [`ClientError`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_bytes(&self, path: &str) -> ClientResult<FileBody>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn token(&self) -> Option<String>;
    async fn set_token(&self, token: Option<String>);
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, url);
        if let Some(token) = self.token.read().await.as_deref() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status, &bytes));
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}")))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path).await;
        self.send(req).await
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<FileBody> {
        let response = self.request(Method::GET, path).await.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status, &bytes));
        }
        Ok(FileBody::from_parts(&headers, bytes.to_vec()))
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).await.json(body);
        self.send(req).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::POST, path).await;
        self.send(req).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path).await.json(body);
        self.send(req).await
    }

    async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::PATCH, path).await;
        self.send(req).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path).await;
        self.send(req).await
    }

    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }
}
