//! Renders an [`OptionSet`] into a [`CommandDescriptor`].

use std::collections::BTreeMap;

use super::options::OptionSet;
use super::types::{placeholder, CommandDescriptor};

/// Renders accumulated options into a descriptor.
///
/// Flag order is fixed and does not depend on the order options were set in:
/// seek, inputs, duration, codecs, bitrates, size, frame rate, preset, CRF,
/// threads, loop, video filters, audio filters, metadata, raw tokens, outputs.
/// Options that were never set produce no tokens.
pub fn render(options: &OptionSet) -> CommandDescriptor {
    let mut args: Vec<String> = Vec::new();
    let mut input_files = BTreeMap::new();
    let mut output_files = BTreeMap::new();

    // Seek must precede the input to get input-side (fast) seeking
    if let Some(ref seek) = options.seek {
        push_flag(&mut args, "-ss", seek);
    }

    // Inputs
    for (index, location) in options.inputs().enumerate() {
        let slot = format!("in{}", index + 1);
        push_flag(&mut args, "-i", &placeholder(&slot));
        input_files.insert(slot, location.to_string());
    }

    if let Some(ref duration) = options.duration {
        push_flag(&mut args, "-t", duration);
    }

    // Codecs
    if let Some(ref codec) = options.video_codec {
        push_flag(&mut args, "-c:v", codec);
    }
    if let Some(ref codec) = options.audio_codec {
        push_flag(&mut args, "-c:a", codec);
    }

    // Bitrates
    if let Some(ref bitrate) = options.video_bitrate {
        push_flag(&mut args, "-b:v", bitrate);
    }
    if let Some(ref bitrate) = options.audio_bitrate {
        push_flag(&mut args, "-b:a", bitrate);
    }

    if let Some(ref size) = options.size {
        push_flag(&mut args, "-s", size);
    }
    if let Some(fps) = options.fps {
        push_flag(&mut args, "-r", &fps.to_string());
    }

    // Encoder tuning
    if let Some(ref preset) = options.preset {
        push_flag(&mut args, "-preset", preset);
    }
    if let Some(crf) = options.crf {
        push_flag(&mut args, "-crf", &crf.to_string());
    }
    if let Some(threads) = options.threads {
        push_flag(&mut args, "-threads", &threads.to_string());
    }

    if options.image_sequence {
        push_flag(&mut args, "-loop", "1");
    }

    // Filter chains
    if !options.video_filters.is_empty() {
        push_flag(&mut args, "-vf", &options.video_filters.join(","));
    }
    if !options.audio_filters.is_empty() {
        push_flag(&mut args, "-af", &options.audio_filters.join(","));
    }

    for (key, value) in options.metadata.iter() {
        push_flag(&mut args, "-metadata", &format!("{}={}", key, value));
    }

    args.extend(options.raw.iter().cloned());

    // Outputs always come last
    for (index, location) in options.outputs().enumerate() {
        let slot = format!("out{}", index + 1);
        args.push(placeholder(&slot));
        output_files.insert(slot, location.to_string());
    }

    CommandDescriptor {
        ffmpeg_command: args.join(" "),
        input_files,
        output_files,
    }
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    args.extend([flag.to_string(), value.to_string()]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> OptionSet {
        OptionSet {
            input: "a.mp4".to_string(),
            output: "b.mp4".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_basic() {
        let descriptor = render(&basic());

        assert_eq!(descriptor.ffmpeg_command, "-i {{in1}} {{out1}}");
        assert_eq!(descriptor.input_files.get("in1").unwrap(), "a.mp4");
        assert_eq!(descriptor.output_files.get("out1").unwrap(), "b.mp4");
    }

    #[test]
    fn test_render_every_option_in_fixed_order() {
        let mut options = basic();
        options.raw = vec!["-movflags".to_string(), "+faststart".to_string()];
        options.metadata.insert("title", "Clip");
        options.audio_filters = vec!["volume=2".to_string()];
        options.video_filters = vec!["scale=640:-1".to_string(), "hflip".to_string()];
        options.image_sequence = true;
        options.threads = Some(4);
        options.crf = Some(23);
        options.preset = Some("fast".to_string());
        options.fps = Some(25.0);
        options.size = Some("640x360".to_string());
        options.audio_bitrate = Some("96k".to_string());
        options.video_bitrate = Some("800k".to_string());
        options.audio_codec = Some("aac".to_string());
        options.video_codec = Some("libx264".to_string());
        options.duration = Some("5".to_string());
        options.seek = Some("00:00:10".to_string());

        let descriptor = render(&options);
        assert_eq!(
            descriptor.ffmpeg_command,
            "-ss 00:00:10 -i {{in1}} -t 5 -c:v libx264 -c:a aac -b:v 800k -b:a 96k \
             -s 640x360 -r 25 -preset fast -crf 23 -threads 4 -loop 1 \
             -vf scale=640:-1,hflip -af volume=2 -metadata title=Clip \
             -movflags +faststart {{out1}}"
        );
    }

    #[test]
    fn test_render_fractional_fps() {
        let mut options = basic();
        options.fps = Some(29.97);
        assert_eq!(render(&options).ffmpeg_command, "-i {{in1}} -r 29.97 {{out1}}");
    }

    #[test]
    fn test_render_zero_values_are_still_emitted() {
        let mut options = basic();
        options.crf = Some(0);
        options.threads = Some(0);
        assert_eq!(
            render(&options).ffmpeg_command,
            "-i {{in1}} -crf 0 -threads 0 {{out1}}"
        );
    }

    #[test]
    fn test_render_unset_locations_are_empty() {
        let descriptor = render(&OptionSet::default());

        assert_eq!(descriptor.ffmpeg_command, "-i {{in1}} {{out1}}");
        assert_eq!(descriptor.input_files.get("in1").unwrap(), "");
        assert_eq!(descriptor.output_files.get("out1").unwrap(), "");
    }

    #[test]
    fn test_render_extra_slots() {
        let mut options = basic();
        options.extra_inputs = vec!["logo.png".to_string()];
        options.extra_outputs = vec!["thumb.jpg".to_string()];
        options.duration = Some("3".to_string());

        let descriptor = render(&options);
        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -i {{in2}} -t 3 {{out1}} {{out2}}"
        );
        assert_eq!(descriptor.input_files.get("in2").unwrap(), "logo.png");
        assert_eq!(descriptor.output_files.get("out2").unwrap(), "thumb.jpg");
    }
}
