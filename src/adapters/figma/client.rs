//! Figma REST API client
//!
//! This module provides the production `FigmaApi` implementation backed by
//! reqwest, with request timeouts and retry with exponential backoff for
//! transient failures.

use super::models::{ImagesResponse, NodesResponse};
use super::FigmaApi;
use crate::config::ApiConfig;
use crate::domain::ids::{join_ids, FileKey, NodeId};
use crate::domain::{FigmaApiError, FigsyncError, RemoteDocument, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::time::Duration;

/// Header Figma expects the personal access token in
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Figma REST API client
///
/// Implements [`FigmaApi`] against the public Figma REST API. One instance
/// is shared across a whole sync run; reqwest pools connections internally.
///
/// # Example
///
/// ```no_run
/// use figsync::adapters::figma::{FigmaApi, FigmaClient};
/// use figsync::config::ApiConfig;
/// use figsync::domain::ids::{FileKey, NodeId};
/// use std::str::FromStr;
///
/// # async fn example(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let client = FigmaClient::new(&config);
///
/// let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA")?;
/// let node_id = NodeId::from_str("12:34")?;
/// let document = client.get_document(&file_key, &node_id).await?;
/// # Ok(())
/// # }
/// ```
pub struct FigmaClient {
    /// Base URL of the Figma REST API
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// API configuration (token, timeouts, retry policy)
    config: ApiConfig,
}

impl FigmaClient {
    /// Create a new Figma client from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration with base URL, token and retry policy
    pub fn new(config: &ApiConfig) -> Self {
        let config = config.clone();
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url,
            client,
            config,
        }
    }

    /// Get the base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a lightweight authenticated request to verify connectivity
    ///
    /// Calls the `/v1/me` endpoint, which answers for any valid token
    /// regardless of file permissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or the token is invalid.
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/v1/me", self.base_url);

        let result = self
            .retry_request(|| async {
                let resp = self
                    .client
                    .get(&url)
                    .header(TOKEN_HEADER, self.token())
                    .send()
                    .await
                    .map_err(request_error)?;

                if resp.status().is_success() {
                    Ok(())
                } else {
                    Err(status_error(resp).await)
                }
            })
            .await;

        match &result {
            Ok(()) => {
                tracing::info!(base_url = %self.base_url, "Figma API health check passed");
            }
            Err(e) => {
                tracing::error!(
                    base_url = %self.base_url,
                    error = %e,
                    "Figma API health check failed"
                );
            }
        }

        result
    }

    fn token(&self) -> &str {
        self.config.token.expose_secret().as_ref()
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transient failures are retried; authentication and client errors
    /// surface immediately.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !is_retryable(&e) {
                        return Err(e);
                    }

                    // Calculate backoff delay
                    let delay_ms = self.config.retry.initial_delay_ms
                        * (self
                            .config
                            .retry
                            .backoff_multiplier
                            .powf((attempt - 1) as f64) as u64);
                    let delay_ms = delay_ms.min(self.config.retry.max_delay_ms);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

#[async_trait]
impl FigmaApi for FigmaClient {
    async fn get_document(&self, file_key: &FileKey, node_id: &NodeId) -> Result<RemoteDocument> {
        let url = format!("{}/v1/files/{}/nodes", self.base_url, file_key);

        tracing::debug!(
            file_key = %file_key,
            node_id = %node_id,
            "Resolving document node"
        );

        self.retry_request(|| async {
            let resp = self
                .client
                .get(&url)
                .query(&[("ids", node_id.as_str()), ("depth", "2")])
                .header(TOKEN_HEADER, self.token())
                .send()
                .await
                .map_err(request_error)?;

            match resp.status() {
                StatusCode::OK => {
                    let nodes: NodesResponse = resp.json().await.map_err(|e| {
                        FigsyncError::Api(FigmaApiError::InvalidResponse(e.to_string()))
                    })?;

                    nodes.into_document(node_id)
                }
                StatusCode::NOT_FOUND => Err(FigsyncError::Api(FigmaApiError::NodeNotFound(
                    format!("{node_id} in file {file_key}"),
                ))),
                _ => Err(status_error(resp).await),
            }
        })
        .await
    }

    async fn get_image_urls(
        &self,
        file_key: &FileKey,
        node_ids: &[NodeId],
    ) -> Result<HashMap<NodeId, Option<String>>> {
        if node_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!("{}/v1/images/{}", self.base_url, file_key);
        let ids_csv = join_ids(node_ids);

        tracing::debug!(
            file_key = %file_key,
            node_count = node_ids.len(),
            "Requesting rendered image URLs"
        );

        self.retry_request(|| async {
            let resp = self
                .client
                .get(&url)
                .query(&[("ids", ids_csv.as_str()), ("format", "png")])
                .header(TOKEN_HEADER, self.token())
                .send()
                .await
                .map_err(request_error)?;

            if resp.status() != StatusCode::OK {
                return Err(status_error(resp).await);
            }

            let images: ImagesResponse = resp
                .json()
                .await
                .map_err(|e| FigsyncError::Api(FigmaApiError::InvalidResponse(e.to_string())))?;

            images.into_url_map()
        })
        .await
    }

    async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        // Rendered image URLs point at short-lived storage, no token needed
        self.retry_request(|| async {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(request_error)?;

            if resp.status() != StatusCode::OK {
                return Err(status_error(resp).await);
            }

            let bytes = resp
                .bytes()
                .await
                .map_err(|e| FigsyncError::Api(FigmaApiError::ConnectionFailed(e.to_string())))?;

            Ok(bytes.to_vec())
        })
        .await
    }
}

/// Map a reqwest transport error to a domain error
fn request_error(e: reqwest::Error) -> FigsyncError {
    if e.is_timeout() {
        FigsyncError::Api(FigmaApiError::Timeout(e.to_string()))
    } else {
        FigsyncError::Api(FigmaApiError::ConnectionFailed(e.to_string()))
    }
}

/// Map a non-success response to a domain error
async fn status_error(resp: Response) -> FigsyncError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FigmaApiError::AuthenticationFailed(format!("status {status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => FigmaApiError::RateLimitExceeded(body),
        s if s.is_server_error() => FigmaApiError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => FigmaApiError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    };

    FigsyncError::Api(err)
}

/// Whether an error is worth retrying
fn is_retryable(error: &FigsyncError) -> bool {
    matches!(
        error,
        FigsyncError::Api(
            FigmaApiError::ConnectionFailed(_)
                | FigmaApiError::Timeout(_)
                | FigmaApiError::RateLimitExceeded(_)
                | FigmaApiError::ServerError { .. }
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;
    use crate::config::RetryConfig;
    use std::str::FromStr;

    fn test_config(base_url: &str, max_retries: usize) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            file_key: "hJb5c0eXzY4kFM2vTqRnwA".to_string(),
            token: secret_string("figd_test".to_string()),
            timeout_seconds: 5,
            retry: RetryConfig {
                max_retries,
                initial_delay_ms: 1,
                max_delay_ms: 10,
                backoff_multiplier: 2.0,
            },
        }
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = test_config("https://api.figma.com/", 1);
        let client = FigmaClient::new(&config);
        assert_eq!(client.base_url(), "https://api.figma.com");
    }

    #[test]
    fn test_is_retryable_classification() {
        let transient = FigsyncError::Api(FigmaApiError::Timeout("30s".to_string()));
        assert!(is_retryable(&transient));

        let transient = FigsyncError::Api(FigmaApiError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        });
        assert!(is_retryable(&transient));

        let fatal = FigsyncError::Api(FigmaApiError::AuthenticationFailed("403".to_string()));
        assert!(!is_retryable(&fatal));

        let fatal = FigsyncError::Api(FigmaApiError::NodeNotFound("1:2".to_string()));
        assert!(!is_retryable(&fatal));
    }

    #[tokio::test]
    async fn test_get_document_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/files/hJb5c0eXzY4kFM2vTqRnwA/nodes")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("ids".into(), "12:34".into()),
                mockito::Matcher::UrlEncoded("depth".into(), "2".into()),
            ]))
            .match_header("x-figma-token", "figd_test")
            .with_status(200)
            .with_body(
                r#"{
                    "name": "Design System",
                    "nodes": {
                        "12:34": {
                            "document": {
                                "id": "12:34",
                                "name": "Icons",
                                "type": "FRAME",
                                "children": [
                                    {"id": "12:35", "name": "close", "type": "COMPONENT"}
                                ]
                            }
                        }
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 1));
        let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();
        let node_id = NodeId::from_str("12:34").unwrap();

        let document = client.get_document(&file_key, &node_id).await.unwrap();
        assert_eq!(document.name, "Icons");
        assert_eq!(document.children.len(), 1);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_document_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/files/hJb5c0eXzY4kFM2vTqRnwA/nodes")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .with_body(r#"{"status": 404, "err": "Not found"}"#)
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 1));
        let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();
        let node_id = NodeId::from_str("99:99").unwrap();

        let result = client.get_document(&file_key, &node_id).await;
        assert!(matches!(
            result,
            Err(FigsyncError::Api(FigmaApiError::NodeNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_document_auth_failure_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/files/hJb5c0eXzY4kFM2vTqRnwA/nodes")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_body(r#"{"status": 403, "err": "Invalid token"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 3));
        let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();
        let node_id = NodeId::from_str("12:34").unwrap();

        let result = client.get_document(&file_key, &node_id).await;
        assert!(matches!(
            result,
            Err(FigsyncError::Api(FigmaApiError::AuthenticationFailed(_)))
        ));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/files/hJb5c0eXzY4kFM2vTqRnwA/nodes")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .with_body("bad gateway")
            .expect(2)
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 2));
        let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();
        let node_id = NodeId::from_str("12:34").unwrap();

        let result = client.get_document(&file_key, &node_id).await;
        assert!(matches!(
            result,
            Err(FigsyncError::Api(FigmaApiError::ServerError { status: 502, .. }))
        ));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_image_urls_single_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/images/hJb5c0eXzY4kFM2vTqRnwA")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("ids".into(), "1:1,1:2".into()),
                mockito::Matcher::UrlEncoded("format".into(), "png".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "err": null,
                    "images": {
                        "1:1": "https://render.example.com/1.png",
                        "1:2": null
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 1));
        let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();
        let ids = vec![
            NodeId::from_str("1:1").unwrap(),
            NodeId::from_str("1:2").unwrap(),
        ];

        let urls = client.get_image_urls(&file_key, &ids).await.unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(
            urls.get(&ids[0]),
            Some(&Some("https://render.example.com/1.png".to_string()))
        );
        assert_eq!(urls.get(&ids[1]), Some(&None));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_image_urls_empty_batch_skips_request() {
        let config = test_config("http://127.0.0.1:1", 1);
        let client = FigmaClient::new(&config);
        let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();

        let urls = client.get_image_urls(&file_key, &[]).await.unwrap();
        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_download_image_returns_bytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/render/1.png")
            .with_status(200)
            .with_body(&[0x89u8, 0x50, 0x4e, 0x47][..])
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 1));
        let url = format!("{}/render/1.png", server.url());

        let bytes = client.download_image(&url).await.unwrap();
        assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn test_health_check_hits_me_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/me")
            .match_header("x-figma-token", "figd_test")
            .with_status(200)
            .with_body(r#"{"id": "1", "email": "dev@example.com"}"#)
            .create_async()
            .await;

        let client = FigmaClient::new(&test_config(&server.url(), 1));
        assert!(client.health_check().await.is_ok());

        mock.assert_async().await;
    }
}
