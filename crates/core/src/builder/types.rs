//! Types produced by the command builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot name of the primary input.
pub const PRIMARY_INPUT: &str = "in1";

/// Slot name of the primary output.
pub const PRIMARY_OUTPUT: &str = "out1";

/// Wraps a slot name in the braces used inside the flag sequence (`in1` -> `{{in1}}`).
pub fn placeholder(slot: &str) -> String {
    format!("{{{{{}}}}}", slot)
}

/// Extracts the slot name from a placeholder token, if the token is one.
pub fn slot_name(token: &str) -> Option<&str> {
    token
        .strip_prefix("{{")
        .and_then(|rest| rest.strip_suffix("}}"))
        .filter(|slot| !slot.is_empty())
}

/// Rendered transcoding request, ready to be sent to the remote service.
///
/// Field names match the wire format of the submission endpoint. The maps are
/// keyed by slot name (`in1`, `out1`, ...) and ordered, so serializing the
/// same descriptor always produces the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Space-separated flag sequence with placeholders instead of locations.
    pub ffmpeg_command: String,
    /// Input slot name -> input location.
    pub input_files: BTreeMap<String, String>,
    /// Output slot name -> output location.
    pub output_files: BTreeMap<String, String>,
}

impl CommandDescriptor {
    /// Iterates over the whitespace-separated tokens of the flag sequence.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.ffmpeg_command.split_whitespace()
    }

    /// Slot names referenced by the flag sequence, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        self.tokens().filter_map(slot_name).collect()
    }

    /// Resolves a slot name against both location maps.
    pub fn location(&self, slot: &str) -> Option<&str> {
        self.input_files
            .get(slot)
            .or_else(|| self.output_files.get(slot))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_wraps_slot() {
        assert_eq!(placeholder("in1"), "{{in1}}");
        assert_eq!(placeholder(PRIMARY_OUTPUT), "{{out1}}");
    }

    #[test]
    fn test_slot_name() {
        assert_eq!(slot_name("{{in2}}"), Some("in2"));
        assert_eq!(slot_name("{{}}"), None);
        assert_eq!(slot_name("-i"), None);
        assert_eq!(slot_name("{{out1"), None);
    }

    #[test]
    fn test_descriptor_wire_format() {
        let descriptor = CommandDescriptor {
            ffmpeg_command: "-i {{in1}} {{out1}}".to_string(),
            input_files: [("in1".to_string(), "a.mp4".to_string())].into(),
            output_files: [("out1".to_string(), "b.mp4".to_string())].into(),
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ffmpeg_command": "-i {{in1}} {{out1}}",
                "input_files": { "in1": "a.mp4" },
                "output_files": { "out1": "b.mp4" },
            })
        );
        assert_eq!(descriptor.placeholders(), vec!["in1", "out1"]);
        assert_eq!(descriptor.location("out1"), Some("b.mp4"));
        assert_eq!(descriptor.location("in2"), None);
    }
}
