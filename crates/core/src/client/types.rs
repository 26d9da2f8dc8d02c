//! Wire types exchanged with the remote FFmpeg service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::builder::{placeholder, slot_name};

/// State of a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Accepted, not started yet.
    Pending,
    /// Running.
    Processing,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
}

impl JobState {
    /// Whether no further transition can happen from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response to a job submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    /// Opaque job identifier.
    pub uuid: String,
    /// State at submission time.
    pub status: JobState,
}

/// Metadata about a file produced by a completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFileMetadata {
    /// Container format, e.g. `mp4`.
    pub file_format: String,
    /// Identifier of the stored file. The service sends it as a string or a number.
    #[serde(deserialize_with = "string_or_number")]
    pub file_id: String,
    /// Media kind, e.g. `video`, `audio`, `image`.
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub size_mbytes: f64,
    /// Where the file can be downloaded from.
    pub storage_url: String,
}

/// Status record of a remote job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub uuid: String,
    pub status: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Progress percentage (0-100).
    #[serde(default)]
    pub progress: f64,
    /// Error description when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Produced files, keyed by output placeholder (`{{out1}}`). Only present
    /// once the job has completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_files: Option<BTreeMap<String, OutputFileMetadata>>,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Looks up a produced file by slot name (`out1`) or placeholder (`{{out1}}`).
    pub fn output_file(&self, slot: &str) -> Option<&OutputFileMetadata> {
        let files = self.output_files.as_ref()?;
        let slot = slot_name(slot).unwrap_or(slot);
        files
            .get(&placeholder(slot))
            .or_else(|| files.get(slot))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
