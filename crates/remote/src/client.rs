//! Generic JSON-over-HTTP client for peer services.

use common::CorrelationId;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// Client for one peer service.
///
/// Holds the peer's name (used in error messages) and base URL. Every
/// operation is exactly one network round trip: no retries, no caching.
/// The correlation id is an explicit argument on every call and travels as
/// the `X-Correlation-ID` header.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    service: &'static str,
    base_url: String,
    http: reqwest::Client,
}

impl ServiceClient {
    /// Creates a client for the peer at `base_url`.
    ///
    /// A trailing slash on the base URL is tolerated; paths passed to the
    /// call methods start with `/`.
    pub fn new(service: &'static str, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            service,
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Name of the peer this client talks to.
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Sends a GET request and decodes the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        correlation: &CorrelationId,
    ) -> Result<T, RemoteError> {
        let response = self.request::<()>(Method::GET, path, None, correlation).await?;
        self.decode(response).await
    }

    /// Sends a POST request with a JSON body and decodes the JSON response.
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        correlation: &CorrelationId,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, Some(body), correlation)
            .await?;
        self.decode(response).await
    }

    /// Sends a PUT request with a JSON body and decodes the JSON response.
    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
        correlation: &CorrelationId,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PUT, path, Some(body), correlation)
            .await?;
        self.decode(response).await
    }

    /// One round trip. Success returns the raw response, anything else is
    /// mapped to a [`RemoteError`] with the body preserved as text.
    #[tracing::instrument(skip(self, body), fields(service = self.service))]
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        correlation: &CorrelationId,
    ) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, url)
            .header(CorrelationId::HEADER, correlation.as_str());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| RemoteError::Transport {
            service: self.service,
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            service = self.service,
            status = status.as_u16(),
            "peer call failed"
        );
        Err(RemoteError::Status {
            service: self.service,
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        response.json().await.map_err(|source| RemoteError::Decode {
            service: self.service,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = ServiceClient::new("inventory", "http://localhost:8081/api/v1/inventory/");
        assert_eq!(client.base_url, "http://localhost:8081/api/v1/inventory");
        assert_eq!(client.service(), "inventory");
    }
}
