//! Testing utilities and mock implementations.
//!
//! This module provides an in-memory [`FfmpegApi`](crate::client::FfmpegApi)
//! and a virtual clock, allowing the job tracker to be exercised without a
//! real service or real delays.
//!
//! # Example
//!
//! ```rust,ignore
//! use ffapi_core::testing::{fixtures, ManualClock, MockApi};
//!
//! let api = MockApi::new();
//! let clock = ManualClock::new();
//! api.script("job-1", vec![fixtures::job_status("job-1", JobState::Processing)]).await;
//!
//! let tracker = JobTracker::with_clock(api.clone(), clock.clone());
//! let err = tracker
//!     .wait_until_terminal(&command, Duration::from_millis(100), Duration::from_millis(250))
//!     .await
//!     .unwrap_err();
//! assert!(err.is_timeout());
//! ```

mod manual_clock;
mod mock_api;

pub use manual_clock::ManualClock;
pub use mock_api::MockApi;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;

    use crate::client::{JobState, JobStatus, OutputFileMetadata};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Create a job status with no result data.
    pub fn job_status(uuid: &str, status: JobState) -> JobStatus {
        let progress = match status {
            JobState::Pending => 0.0,
            JobState::Processing => 50.0,
            JobState::Completed | JobState::Failed => 100.0,
        };

        JobStatus {
            uuid: uuid.to_string(),
            status,
            result: None,
            progress,
            error: None,
            created_at: created_at(),
            updated_at: created_at(),
            output_files: None,
        }
    }

    /// Create a completed status with one 1280x720 mp4 output in `out1`.
    pub fn completed_status(uuid: &str, storage_url: &str) -> JobStatus {
        let mut status = job_status(uuid, JobState::Completed);
        status.output_files = Some(BTreeMap::from([(
            "{{out1}}".to_string(),
            OutputFileMetadata {
                file_format: "mp4".to_string(),
                file_id: "456".to_string(),
                file_type: "video".to_string(),
                width: Some(1280),
                height: Some(720),
                size_mbytes: 10.0,
                storage_url: storage_url.to_string(),
            },
        )]));
        status
    }

    /// Create a failed status with an error description.
    pub fn failed_status(uuid: &str, error: &str) -> JobStatus {
        let mut status = job_status(uuid, JobState::Failed);
        status.error = Some(error.to_string());
        status
    }
}
