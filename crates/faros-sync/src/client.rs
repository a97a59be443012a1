// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Minimal JSON-over-HTTP client bound to one remote service.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::normalize_url;
use crate::error::{ApiError, Result, SyncError};

/// HTTP methods used against the remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A request wrapper bound to a single base URL.
///
/// Every failure (transport, non-2xx status, undecodable body) comes back as
/// an [`ApiError`] carrying the caller's context message.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl ServiceClient {
    /// Create a client for `base_url`. The URL must be absolute.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_url(base_url.as_ref());
        url::Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            headers: HeaderMap::new(),
        })
    }

    /// Attach a header sent with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SyncError::Config(format!("invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| SyncError::Config(format!("invalid value for header {}: {}", name, e)))?;
        self.headers.insert(header, value);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty response body decodes as JSON `null`.
    pub async fn request<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        context: &str,
    ) -> std::result::Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(method = method.as_str(), url = %url, "Sending request");

        let mut request = self
            .http
            .request(method.into(), &url)
            .headers(self.headers.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::new(context, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                context,
                format!("request failed with status {}", status),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::new(context, e.without_url()))?;
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };

        serde_json::from_slice(payload)
            .map_err(|e| ApiError::new(context, format!("malformed response body: {}", e)))
    }

    /// GET `path` and decode the response.
    pub async fn get<T>(&self, path: &str, context: &str) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(HttpMethod::Get, path, None, context)
            .await
    }

    /// POST a JSON body to `path` and decode the response.
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> std::result::Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(HttpMethod::Post, path, Some(body), context)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ServiceClient::new("http://localhost:8000/api/v1/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/health"), "http://localhost:8000/api/v1/health");
        assert_eq!(
            client.url("sources/list"),
            "http://localhost:8000/api/v1/sources/list"
        );
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let err = ServiceClient::new("localhost", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let client = ServiceClient::new("http://localhost", Duration::from_secs(1)).unwrap();
        let err = client
            .with_header("x-metabase-session", "bad\nvalue")
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_header_names_are_validated() {
        let client = ServiceClient::new("http://localhost", Duration::from_secs(1)).unwrap();
        let client = client.with_header("X-Metabase-Session", "abc").unwrap();
        assert_eq!(client.headers["x-metabase-session"], "abc");

        let err = client.with_header("bad header", "abc").unwrap_err();
        assert!(matches!(err, SyncError::Config(ref msg) if msg.contains("bad header")));
    }
}
