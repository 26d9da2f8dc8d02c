pub mod builder;
pub mod client;
pub mod config;
pub mod job;
pub mod testing;

pub use builder::{CommandBuilder, CommandDescriptor};
pub use client::{
    ApiError, FfmpegApi, HttpApiClient, JobHandle, JobState, JobStatus, OutputFileMetadata,
};
pub use config::{
    load_config, load_config_from_str, validate_config, ApiConfig, Config, ConfigError,
    SanitizedConfig, WaitConfig,
};
pub use job::{Clock, JobError, JobTracker, SystemClock, WaitOptions};
