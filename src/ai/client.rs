use reqwest::{Client, RequestBuilder, Response};
use thiserror::Error;

use crate::config::OllamaConfig;

use super::inference::{
    build_generate_request, parse_generate_response, PullRequest, PullResponse, TagsResponse,
};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot reach Ollama at {base_url}")]
    Connect {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to Ollama timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("Ollama returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("HTTP error talking to Ollama: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected Ollama response: {0}")]
    Decode(String),
}

/// Single prompt in, raw completion text out.
pub trait ModelClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, TransportError>;
}

#[derive(Clone)]
pub struct OllamaClient {
    http: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(http: Client, mut config: OllamaConfig) -> Self {
        config.host = config.host.trim_end_matches('/').to_string();
        Self { http, config }
    }

    pub fn from_config(config: OllamaConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .user_agent(format!("password-folders/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(http, config))
    }

    pub fn base_url(&self) -> &str {
        &self.config.host
    }

    pub async fn list_models(&self) -> Result<Vec<String>, TransportError> {
        let request = self
            .http
            .get(self.endpoint("api/tags"))
            .timeout(self.config.request_timeout);
        let response = self.send(request).await?;
        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        Ok(tags.models.into_iter().map(|model| model.name).collect())
    }

    /// Blocks until Ollama reports the pull finished. No request timeout: pulls
    /// routinely take minutes.
    pub async fn pull_model(&self, model: &str) -> Result<(), TransportError> {
        let request = self.http.post(self.endpoint("api/pull")).json(&PullRequest {
            model,
            stream: false,
        });
        let response = self.send(request).await?;
        let pulled: PullResponse = response
            .json()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        tracing::info!(target: "ollama", model, status = %pulled.status, "model pull finished");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.host, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request.send().await.map_err(|err| self.map_send_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        Ok(response)
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                secs: self.config.request_timeout.as_secs(),
            }
        } else if err.is_connect() {
            TransportError::Connect {
                base_url: self.config.host.clone(),
                source: err,
            }
        } else {
            TransportError::Http(err)
        }
    }
}

impl ModelClient for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, TransportError> {
        let request = self
            .http
            .post(self.endpoint("api/generate"))
            .timeout(self.config.request_timeout)
            .json(&build_generate_request(model, prompt));

        tracing::debug!(target: "ollama", model, prompt_len = prompt.len(), "generate request");
        let response = self.send(request).await?;
        parse_generate_response(response).await
    }
}
