//! HTTP implementation of [`FfmpegApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::builder::CommandDescriptor;
use crate::config::ApiConfig;

use super::error::ApiError;
use super::traits::FfmpegApi;
use super::types::{JobHandle, JobStatus};

/// Header carrying the caller's API token on every request.
pub const API_TOKEN_HEADER: &str = "X-API-Token";

/// Client for the FFmpeg API over HTTP.
///
/// - `POST {base}/ffmpeg` submits a [`CommandDescriptor`]
/// - `GET {base}/ffmpeg/progress/{uuid}` returns a [`JobStatus`]
///
/// Any non-2xx response fails the call with [`ApiError::Http`].
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl HttpApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Get the base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn submit_url(&self) -> String {
        format!("{}/ffmpeg", self.base_url)
    }

    fn status_url(&self, job_id: &str) -> String {
        format!(
            "{}/ffmpeg/progress/{}",
            self.base_url,
            urlencoding::encode(job_id)
        )
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(CONTENT_TYPE, "application/json")
            .header(API_TOKEN_HEADER, &self.api_token)
    }

    /// Send a request and decode a successful JSON response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "FFmpeg API request failed");
            return Err(ApiError::http(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl FfmpegApi for HttpApiClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit(&self, command: &CommandDescriptor) -> Result<JobHandle, ApiError> {
        let url = self.submit_url();
        debug!(url = %url, command = %command.ffmpeg_command, "Submitting FFmpeg job");

        let request = self.with_headers(self.client.post(&url)).json(command);
        let handle: JobHandle = self.send(request).await?;

        info!(job_id = %handle.uuid, status = %handle.status, "FFmpeg job submitted");
        Ok(handle)
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatus, ApiError> {
        let url = self.status_url(job_id);
        debug!(job_id = job_id, "Fetching FFmpeg job status");

        let request = self.with_headers(self.client.get(&url));
        self.send(request).await
    }
}
