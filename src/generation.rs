//! Client for the external generation backend.
//!
//! One `POST /api/generate` per request: no retry, no timeout, no
//! deduplication. A non-2xx status and a `success: false` body are both
//! failures.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::types::{ClientConfig, GenerateRequest, GenerateResponse, GenerationResult};

/// Endpoint path, relative to the backend origin.
const GENERATE_PATH: &str = "/api/generate";

/// Used when the backend's file path has no usable file name.
const FALLBACK_FILE_NAME: &str = "presentation.pptx";

// ============================================================================
// ERRORS
// ============================================================================

/// A generation round trip that did not produce a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailed {
    /// The request never got a response (connect, DNS, I/O).
    #[error("generation failed: request error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("generation failed: backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("generation failed: unreadable response: {0}")]
    Decode(String),

    /// The backend reported `success: false`.
    #[error("generation failed: {0}")]
    Rejected(String),
}

/// Fetching a generated file failed.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("download returned HTTP {0}")]
    Status(u16),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Check a decoded payload: success must be true and both handles present.
pub fn check_response(response: GenerateResponse) -> Result<GenerateResponse, GenerationFailed> {
    if !response.success {
        let reason = response
            .error
            .clone()
            .unwrap_or_else(|| "backend reported success: false".to_string());
        return Err(GenerationFailed::Rejected(reason));
    }
    if response.download_url.is_none() {
        return Err(GenerationFailed::Decode("missing download_url".to_string()));
    }
    if response.file_path.is_none() {
        return Err(GenerationFailed::Decode("missing file_path".to_string()));
    }
    Ok(response)
}

// ============================================================================
// BACKEND SEAM
// ============================================================================

/// Anything that can turn a generation request into a response payload.
///
/// The HTTP client is the production implementation; tests plug in stubs.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerationFailed>;
}

// ============================================================================
// HTTP BACKEND
// ============================================================================

/// Talks to the generation backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the generate endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    /// Resolve a backend-relative download URL against the backend origin.
    /// Absolute URLs pass through unchanged.
    pub fn absolute_url(&self, download_url: &str) -> String {
        if download_url.starts_with("http://") || download_url.starts_with("https://") {
            return download_url.to_string();
        }
        format!("{}/{}", self.base_url, download_url.trim_start_matches('/'))
    }

    /// Fetch the generated file into `dest_dir`, named after the last
    /// segment of `file_path`. Returns the written path.
    pub async fn download(
        &self,
        result: &GenerationResult,
        dest_dir: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let url = self.absolute_url(&result.download_url);
        log::info!("downloading {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes().await?;

        let path = dest_dir.join(download_file_name(&result.file_path));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| DownloadError::Write {
                path: path.clone(),
                source,
            })?;

        log::info!("saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerationFailed> {
        let url = self.endpoint();
        log::info!("requesting generation for topic {:?} ({})", request.topic, request.theme);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| GenerationFailed::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationFailed::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|err| GenerationFailed::Decode(err.to_string()))?;

        check_response(parsed)
    }
}

/// Pull `error` out of a JSON failure body, else return the body itself.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// File name for a downloaded presentation.
pub fn download_file_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

// ============================================================================
// TESTS
// ============================================================================
