//! Trait definitions for the API client.

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{JobHandle, JobStatus};
use crate::builder::CommandDescriptor;

/// Request/response access to a remote FFmpeg execution service.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait FfmpegApi: Send + Sync {
    /// Returns the name of this backend for logging.
    fn name(&self) -> &str;

    /// Submits a command for execution and returns the new job's handle.
    async fn submit(&self, command: &CommandDescriptor) -> Result<JobHandle, ApiError>;

    /// Fetches the current status of a job.
    async fn job_status(&self, job_id: &str) -> Result<JobStatus, ApiError>;
}
