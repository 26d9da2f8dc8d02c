//! Accumulated encoding options.

/// Ordered key/value metadata.
///
/// A key keeps the position of its first insertion; inserting it again only
/// replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Inserts or overwrites a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in key order (first-insertion order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything a [`CommandBuilder`](super::CommandBuilder) has accumulated.
///
/// Scalar options are `None` until set. Rendering only looks at this struct,
/// never at the order in which the builder was called.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    /// Primary input location (`in1`). Empty when never set.
    pub input: String,
    /// Additional input locations (`in2`, `in3`, ...).
    pub extra_inputs: Vec<String>,
    /// Primary output location (`out1`). Empty when never set.
    pub output: String,
    /// Additional output locations (`out2`, `out3`, ...).
    pub extra_outputs: Vec<String>,

    /// Input seek position (`-ss`), placed before the input for fast seeking.
    pub seek: Option<String>,
    /// Duration limit (`-t`).
    pub duration: Option<String>,

    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub video_bitrate: Option<String>,
    pub audio_bitrate: Option<String>,
    /// Output frame size, e.g. `1280x720`.
    pub size: Option<String>,
    /// Output frame rate.
    pub fps: Option<f64>,

    pub preset: Option<String>,
    /// Constant Rate Factor.
    pub crf: Option<u32>,
    pub threads: Option<u32>,

    /// Treat the input as a looped still image (`-loop 1`).
    pub image_sequence: bool,

    pub video_filters: Vec<String>,
    pub audio_filters: Vec<String>,
    pub metadata: Metadata,
    /// Raw passthrough tokens, rendered after every structured option.
    pub raw: Vec<String>,
}

impl OptionSet {
    /// Input locations in slot order, primary first.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.input.as_str()).chain(self.extra_inputs.iter().map(String::as_str))
    }

    /// Output locations in slot order, primary first.
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.output.as_str()).chain(self.extra_outputs.iter().map(String::as_str))
    }
}
