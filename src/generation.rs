use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::utils::http::get_http_client;

const ERROR_BODY_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("image backend error: {0}")]
    Backend(String),
    #[error("image backend timed out")]
    Timeout,
}

/// The image-synthesis capability: a prompt in, PNG bytes out. Implementations
/// must be stateless and safe to call concurrently.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError>;
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Calls a hosted Stable Diffusion inference endpoint. The endpoint returns
/// raw image bytes on success and a JSON error body otherwise.
pub struct StableDiffusionClient {
    endpoint: String,
    api_token: String,
}

impl StableDiffusionClient {
    pub fn new(endpoint: String, api_token: String) -> Self {
        Self {
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl GenerationClient for StableDiffusionClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        debug!(endpoint = %self.endpoint, "requesting image generation");
        let response = get_http_client()
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Backend(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend(format!(
                "status {status}: {}",
                truncate_for_log(&body, ERROR_BODY_LIMIT)
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| GenerationError::Backend(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}
