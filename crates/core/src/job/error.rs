//! Error types for the job tracker.

use thiserror::Error;

use crate::client::ApiError;

/// Errors that end a tracker operation.
///
/// A job that the service reports as `failed` is not an error: it is returned
/// as a normal terminal [`JobStatus`](crate::client::JobStatus).
#[derive(Debug, Error)]
pub enum JobError {
    /// The job could not be submitted.
    #[error("Failed to submit FFmpeg job: {0}")]
    Submission(#[source] ApiError),

    /// A status request failed.
    #[error("Failed to poll FFmpeg job {job_id}: {source}")]
    Poll {
        job_id: String,
        #[source]
        source: ApiError,
    },

    /// No terminal status was observed before the deadline.
    #[error("Timed out after {timeout_ms} ms waiting for FFmpeg job {job_id} ({polls} polls)")]
    Timeout {
        job_id: String,
        timeout_ms: u64,
        polls: u32,
    },
}

impl JobError {
    /// Whether the wait deadline expired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether a request to the service failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Submission(_) | Self::Poll { .. })
    }

    /// The underlying API error, for transport failures.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Submission(source) | Self::Poll { source, .. } => Some(source),
            Self::Timeout { .. } => None,
        }
    }

    /// The job id, once submission has succeeded.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::Submission(_) => None,
            Self::Poll { job_id, .. } | Self::Timeout { job_id, .. } => Some(job_id),
        }
    }
}
