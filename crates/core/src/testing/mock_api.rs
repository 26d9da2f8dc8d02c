//! Mock FFmpeg API for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::builder::CommandDescriptor;
use crate::client::{ApiError, FfmpegApi, JobHandle, JobState, JobStatus};

/// Mock implementation of the FfmpegApi trait.
///
/// Provides controllable behavior for testing:
/// - Record submitted commands for assertions
/// - Script the sequence of statuses each job reports
/// - Count polls per job
/// - Inject a failure into the next submission or poll
///
/// Submitted jobs are assigned ids `job-1`, `job-2`, ... in submission order.
/// A scripted job reports its statuses in order and then keeps repeating the
/// last one.
///
/// # Example
///
/// ```rust,ignore
/// use ffapi_core::testing::{fixtures, MockApi};
///
/// let api = MockApi::new();
/// api.script("job-1", vec![
///     fixtures::job_status("job-1", JobState::Processing),
///     fixtures::completed_status("job-1", "https://example.com/out.mp4"),
/// ]).await;
///
/// let tracker = JobTracker::new(api.clone());
/// let status = tracker.execute_and_wait(&command).await?;
///
/// assert_eq!(api.poll_count("job-1").await, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    /// Recorded submissions, including failed ones.
    submissions: Arc<RwLock<Vec<CommandDescriptor>>>,
    /// Remaining statuses per job id.
    scripts: Arc<RwLock<HashMap<String, VecDeque<JobStatus>>>>,
    /// Status requests received per job id.
    polls: Arc<RwLock<HashMap<String, usize>>>,
    /// If set, the next submission fails with this error.
    next_submit_error: Arc<RwLock<Option<ApiError>>>,
    /// If set, the next poll fails with this error.
    next_poll_error: Arc<RwLock<Option<ApiError>>>,
}

impl MockApi {
    /// Create a new mock API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the statuses reported for a job.
    pub async fn script(&self, job_id: impl Into<String>, statuses: Vec<JobStatus>) {
        self.scripts
            .write()
            .await
            .insert(job_id.into(), statuses.into());
    }

    /// Get all submitted commands.
    pub async fn submissions(&self) -> Vec<CommandDescriptor> {
        self.submissions.read().await.clone()
    }

    /// Number of status requests made for a job.
    pub async fn poll_count(&self, job_id: &str) -> usize {
        self.polls.read().await.get(job_id).copied().unwrap_or(0)
    }

    /// Configure the next submission to fail with the given error.
    pub async fn fail_next_submit(&self, error: ApiError) {
        *self.next_submit_error.write().await = Some(error);
    }

    /// Configure the next poll to fail with the given error.
    pub async fn fail_next_poll(&self, error: ApiError) {
        *self.next_poll_error.write().await = Some(error);
    }

    /// Next status for a job, keeping the last one once the script runs out.
    async fn next_status(&self, job_id: &str) -> Option<JobStatus> {
        let mut scripts = self.scripts.write().await;
        let queue = scripts.get_mut(job_id)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl FfmpegApi for MockApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(&self, command: &CommandDescriptor) -> Result<JobHandle, ApiError> {
        let job_number = {
            let mut submissions = self.submissions.write().await;
            submissions.push(command.clone());
            submissions.len()
        };

        if let Some(err) = self.next_submit_error.write().await.take() {
            return Err(err);
        }

        Ok(JobHandle {
            uuid: format!("job-{}", job_number),
            status: JobState::Pending,
        })
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatus, ApiError> {
        *self
            .polls
            .write()
            .await
            .entry(job_id.to_string())
            .or_insert(0) += 1;

        if let Some(err) = self.next_poll_error.write().await.take() {
            return Err(err);
        }

        self.next_status(job_id)
            .await
            .ok_or_else(|| ApiError::http(404, format!("Job {} not found", job_id)))
    }
}
