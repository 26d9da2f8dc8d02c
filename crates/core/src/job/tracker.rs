//! Job lifecycle tracker: submit once, poll until terminal or timeout.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::builder::CommandDescriptor;
use crate::client::{ApiError, FfmpegApi, HttpApiClient, JobHandle, JobStatus};
use crate::config::{Config, WaitConfig};

use super::clock::{Clock, SystemClock};
use super::error::JobError;

/// Poll interval and overall deadline for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Fixed delay between polls.
    pub poll_interval: Duration,
    /// Deadline measured from the start of the wait, submission included.
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::from(&WaitConfig::default())
    }
}

impl From<&WaitConfig> for WaitOptions {
    fn from(config: &WaitConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

/// Drives FFmpeg jobs from submission to a terminal status.
///
/// All per-wait state lives inside the call, so one tracker can run any
/// number of waits concurrently.
pub struct JobTracker<A, C = SystemClock> {
    api: A,
    clock: C,
    options: WaitOptions,
}

impl<A: FfmpegApi> JobTracker<A> {
    /// Creates a tracker using tokio's clock and default wait options.
    pub fn new(api: A) -> Self {
        Self::with_clock(api, SystemClock)
    }
}

impl JobTracker<HttpApiClient> {
    /// Creates an HTTP-backed tracker from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let api = HttpApiClient::new(&config.api)?;
        Ok(Self::new(api).with_options(WaitOptions::from(&config.wait)))
    }
}

impl<A: FfmpegApi, C: Clock> JobTracker<A, C> {
    /// Creates a tracker with a custom clock.
    pub fn with_clock(api: A, clock: C) -> Self {
        Self {
            api,
            clock,
            options: WaitOptions::default(),
        }
    }

    /// Sets the options used by [`execute_and_wait`](Self::execute_and_wait).
    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn options(&self) -> WaitOptions {
        self.options
    }

    /// Submits a command. Not retried on failure.
    pub async fn submit(&self, command: &CommandDescriptor) -> Result<JobHandle, JobError> {
        self.api.submit(command).await.map_err(JobError::Submission)
    }

    /// Fetches the status of a job once. Not retried on failure.
    pub async fn poll(&self, job_id: &str) -> Result<JobStatus, JobError> {
        self.api
            .job_status(job_id)
            .await
            .map_err(|source| JobError::Poll {
                job_id: job_id.to_string(),
                source,
            })
    }

    /// Submits `command`, then polls every `poll_interval` until the job is
    /// completed or failed.
    ///
    /// Fails with [`JobError::Timeout`] once `timeout` has elapsed since the
    /// call started without a terminal status; the last non-terminal status
    /// is not returned in that case. A failed submission or poll aborts the
    /// wait immediately.
    pub async fn wait_until_terminal(
        &self,
        command: &CommandDescriptor,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<JobStatus, JobError> {
        let start = self.clock.now();
        let handle = self.submit(command).await?;
        let mut polls: u32 = 0;

        while self.clock.now().saturating_duration_since(start) < timeout {
            let status = self.poll(&handle.uuid).await?;
            polls += 1;

            debug!(
                job_id = %handle.uuid,
                status = %status.status,
                progress = status.progress,
                polls,
                "Polled FFmpeg job"
            );

            if status.is_terminal() {
                info!(
                    job_id = %handle.uuid,
                    status = %status.status,
                    polls,
                    "FFmpeg job finished"
                );
                return Ok(status);
            }

            self.clock.sleep(poll_interval).await;
        }

        warn!(
            job_id = %handle.uuid,
            timeout_ms = timeout.as_millis() as u64,
            polls,
            "Timed out waiting for FFmpeg job"
        );
        Err(JobError::Timeout {
            job_id: handle.uuid,
            timeout_ms: timeout.as_millis() as u64,
            polls,
        })
    }

    /// [`wait_until_terminal`](Self::wait_until_terminal) with this tracker's options.
    pub async fn execute_and_wait(&self, command: &CommandDescriptor) -> Result<JobStatus, JobError> {
        self.wait_until_terminal(command, self.options.poll_interval, self.options.timeout)
            .await
    }
}
