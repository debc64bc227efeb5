use crate::api::models::{ErrorBody, RenderRequest};
use crate::error::ApiError;
use reqwest::{Client, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("botmeta-cli/", env!("CARGO_PKG_VERSION"));

/// Client for the BOTMETA validation service.
///
/// Issues exactly one outbound request per call. No retry and no fencing of
/// in-flight requests.
#[derive(Debug, Clone)]
pub struct BotmetaClient {
    client: Client,
    pub base_url: String,
    timeout_secs: u64,
}

impl BotmetaClient {
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(BotmetaClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the current metadata document.
    ///
    /// The body is opaque to this client (the server proxies a YAML file);
    /// it is returned verbatim so it can be forwarded unmodified in a later
    /// render request.
    pub async fn fetch_current(&self) -> Result<String, ApiError> {
        let endpoint = "/current";
        let response = self
            .client
            .get(self.endpoint_url(endpoint))
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.server_error(response, endpoint).await);
        }

        response.text().await.map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("Failed to read response body: {}", e),
        })
    }

    /// Resolve file paths against a metadata document.
    ///
    /// The parsed response is returned independent of its shape.
    pub async fn render(&self, request: &RenderRequest) -> Result<serde_json::Value, ApiError> {
        let endpoint = "/render";
        let response = self
            .client
            .post(self.endpoint_url(endpoint))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        self.handle_response(response, endpoint).await
    }

    async fn handle_response(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| ApiError::Decode {
                    endpoint: endpoint.to_string(),
                    message: format!("Failed to parse response: {}", e),
                })
        } else {
            Err(self.server_error(response, endpoint).await)
        }
    }

    /// Non-success status. Prefer the `error` field of a structured body,
    /// fall back to the raw body text.
    async fn server_error(&self, response: Response, endpoint: &str) -> ApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error_body) => error_body.error,
            Err(_) => body,
        };

        ApiError::Server {
            status,
            endpoint: endpoint.to_string(),
            message,
        }
    }

    fn transport_error(&self, endpoint: &str, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: endpoint.to_string(),
            }
        } else {
            ApiError::Transport {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            }
        }
    }
}
