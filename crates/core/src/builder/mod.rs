//! Command builder for remote FFmpeg jobs.
//!
//! This module turns typed encoding options into a [`CommandDescriptor`]: a
//! flag sequence that references files only through placeholders such as
//! `{{in1}}` and `{{out1}}`, plus maps that bind those placeholders to real
//! locations. The remote service substitutes the locations before running
//! FFmpeg.
//!
//! Rendering is a pure function of the accumulated [`OptionSet`], so building
//! the same options twice always yields identical descriptors.
//!
//! # Example
//!
//! ```
//! use ffapi_core::builder::CommandBuilder;
//!
//! let descriptor = CommandBuilder::new()
//!     .seek("00:00:30")
//!     .input("https://example.com/source.mov")
//!     .duration("10")
//!     .video_codec("libx264")
//!     .crf(23)
//!     .add_metadata("title", "Teaser")
//!     .output("teaser.mp4")
//!     .build();
//!
//! assert_eq!(
//!     descriptor.ffmpeg_command,
//!     "-ss 00:00:30 -i {{in1}} -t 10 -c:v libx264 -crf 23 -metadata title=Teaser {{out1}}"
//! );
//! assert_eq!(descriptor.input_files["in1"], "https://example.com/source.mov");
//! ```

mod command;
mod options;
mod render;
mod types;

pub use command::CommandBuilder;
pub use options::{Metadata, OptionSet};
pub use render::render;
pub use types::{placeholder, slot_name, CommandDescriptor, PRIMARY_INPUT, PRIMARY_OUTPUT};
