//! Remote FFmpeg API client.
//!
//! This module provides the `FfmpegApi` trait, the transport seam between the
//! job tracker and the remote execution service, and `HttpApiClient`, its
//! reqwest-backed implementation.

mod error;
mod http;
mod traits;
mod types;

pub use error::ApiError;
pub use http::{HttpApiClient, API_TOKEN_HEADER};
pub use traits::FfmpegApi;
pub use types::{JobHandle, JobState, JobStatus, OutputFileMetadata};
