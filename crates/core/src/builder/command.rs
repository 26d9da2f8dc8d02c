//! Fluent builder for FFmpeg command descriptors.

use std::fmt::Display;

use super::options::OptionSet;
use super::render::render;
use super::types::CommandDescriptor;

/// Fluent builder that accumulates encoding options.
///
/// Setters for scalar options overwrite any earlier value. Filters, metadata,
/// raw options and extra file slots accumulate. Calling order never changes
/// the rendered flag order.
///
/// ```
/// use ffapi_core::CommandBuilder;
///
/// let descriptor = CommandBuilder::new()
///     .input("https://example.com/in.mp4")
///     .video_codec("libx264")
///     .scale(1280)
///     .output("out.mp4")
///     .build();
///
/// assert_eq!(
///     descriptor.ffmpeg_command,
///     "-i {{in1}} -c:v libx264 -vf scale=1280:-1 {{out1}}"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    options: OptionSet,
}

impl CommandBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the options accumulated so far.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Binds the primary input (`in1`).
    #[must_use]
    pub fn input(mut self, location: impl Into<String>) -> Self {
        self.options.input = location.into();
        self
    }

    /// Binds the primary output (`out1`).
    #[must_use]
    pub fn output(mut self, location: impl Into<String>) -> Self {
        self.options.output = location.into();
        self
    }

    /// Adds another input slot (`in2`, `in3`, ...).
    #[must_use]
    pub fn add_input(mut self, location: impl Into<String>) -> Self {
        self.options.extra_inputs.push(location.into());
        self
    }

    /// Adds another output slot (`out2`, `out3`, ...).
    #[must_use]
    pub fn add_output(mut self, location: impl Into<String>) -> Self {
        self.options.extra_outputs.push(location.into());
        self
    }

    #[must_use]
    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.options.video_codec = Some(codec.into());
        self
    }

    #[must_use]
    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.options.audio_codec = Some(codec.into());
        self
    }

    /// Sets the video bitrate, e.g. `"1000k"`.
    #[must_use]
    pub fn video_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.options.video_bitrate = Some(bitrate.into());
        self
    }

    /// Sets the audio bitrate, e.g. `"128k"`.
    #[must_use]
    pub fn audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.options.audio_bitrate = Some(bitrate.into());
        self
    }

    /// Sets the output frame size, e.g. `"1280x720"`.
    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.options.size = Some(size.into());
        self
    }

    #[must_use]
    pub fn fps(mut self, fps: f64) -> Self {
        self.options.fps = Some(fps);
        self
    }

    /// Sets the encoder preset, e.g. `"veryfast"`.
    #[must_use]
    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.options.preset = Some(preset.into());
        self
    }

    #[must_use]
    pub fn crf(mut self, crf: u32) -> Self {
        self.options.crf = Some(crf);
        self
    }

    #[must_use]
    pub fn threads(mut self, threads: u32) -> Self {
        self.options.threads = Some(threads);
        self
    }

    /// Starts reading the input at the given position (`"00:01:30"` or seconds).
    #[must_use]
    pub fn seek(mut self, time: impl Into<String>) -> Self {
        self.options.seek = Some(time.into());
        self
    }

    /// Limits the output duration.
    #[must_use]
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.options.duration = Some(duration.into());
        self
    }

    /// Appends a video filter expression. Empty expressions are ignored.
    #[must_use]
    pub fn add_video_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        if !filter.is_empty() {
            self.options.video_filters.push(filter);
        }
        self
    }

    /// Appends an audio filter expression. Empty expressions are ignored.
    #[must_use]
    pub fn add_audio_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        if !filter.is_empty() {
            self.options.audio_filters.push(filter);
        }
        self
    }

    /// Rotates the video clockwise by `degrees`.
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        self.add_video_filter(format!("rotate={}*PI/180", degrees))
    }

    /// Crops to `width`x`height`, centered (the filter's default position).
    #[must_use]
    pub fn crop(self, width: u32, height: u32) -> Self {
        self.add_video_filter(format!("crop={}:{}", width, height))
    }

    /// Crops to `width`x`height` with the top-left corner at (`x`, `y`).
    #[must_use]
    pub fn crop_at(self, width: u32, height: u32, x: u32, y: u32) -> Self {
        self.add_video_filter(format!("crop={}:{}:{}:{}", width, height, x, y))
    }

    /// Scales to `width`, deriving the height from the aspect ratio.
    ///
    /// `width` may be a number or an expression such as `"iw/2"`.
    #[must_use]
    pub fn scale(self, width: impl Display) -> Self {
        self.add_video_filter(format!("scale={}:-1", width))
    }

    /// Scales to an explicit `width` and `height`.
    #[must_use]
    pub fn scale_to(self, width: impl Display, height: impl Display) -> Self {
        self.add_video_filter(format!("scale={}:{}", width, height))
    }

    /// Multiplies the audio volume by `level`.
    #[must_use]
    pub fn volume(self, level: f64) -> Self {
        self.add_audio_filter(format!("volume={}", level))
    }

    /// Treats the input as a looped still image played at `frame_rate`.
    #[must_use]
    pub fn image_sequence(mut self, frame_rate: f64) -> Self {
        self.options.image_sequence = true;
        self.options.fps = Some(frame_rate);
        self
    }

    /// Sets a container metadata tag. Re-adding a key replaces its value in place.
    #[must_use]
    pub fn add_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.metadata.insert(key, value);
        self
    }

    /// Appends a raw token, rendered after every structured option.
    /// Empty tokens are ignored.
    #[must_use]
    pub fn add_option(mut self, option: impl Into<String>) -> Self {
        let option = option.into();
        if !option.is_empty() {
            self.options.raw.push(option);
        }
        self
    }

    /// Renders the accumulated options. Does not consume or modify the builder.
    pub fn build(&self) -> CommandDescriptor {
        render(&self.options)
    }
}

impl From<OptionSet> for CommandBuilder {
    fn from(options: OptionSet) -> Self {
        Self { options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const REMOTE_INPUT: &str =
        "https://storage.googleapis.com/ffmpeg-api-test-bucket/user_1/input/test.mp4";

    #[test]
    fn test_build_basic_command() {
        let descriptor = CommandBuilder::new()
            .input(REMOTE_INPUT)
            .output("output.mp4")
            .build();

        assert_eq!(descriptor.ffmpeg_command, "-i {{in1}} {{out1}}");
        assert_eq!(descriptor.input_files.get("in1").unwrap(), REMOTE_INPUT);
        assert_eq!(descriptor.output_files.get("out1").unwrap(), "output.mp4");
    }

    #[test]
    fn test_build_layered_command() {
        let descriptor = CommandBuilder::new()
            .input("a.mp4")
            .video_codec("libx264")
            .audio_codec("aac")
            .video_bitrate("1000k")
            .audio_bitrate("128k")
            .size("1280x720")
            .fps(30.0)
            .output("b.mp4")
            .build();

        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -c:v libx264 -c:a aac -b:v 1000k -b:a 128k -s 1280x720 -r 30 {{out1}}"
        );
    }

    #[test]
    fn test_call_order_does_not_change_output() {
        let a = CommandBuilder::new()
            .output("b.mp4")
            .fps(24.0)
            .seek("10")
            .audio_codec("aac")
            .input("a.mp4")
            .video_codec("libx265")
            .build();
        let b = CommandBuilder::new()
            .input("a.mp4")
            .seek("10")
            .video_codec("libx265")
            .audio_codec("aac")
            .fps(24.0)
            .output("b.mp4")
            .build();

        assert_eq!(a, b);
        assert_eq!(
            a.ffmpeg_command,
            "-ss 10 -i {{in1}} -c:v libx265 -c:a aac -r 24 {{out1}}"
        );
    }

    #[test]
    fn test_build_is_repeatable() {
        let builder = CommandBuilder::new()
            .input("a.mp4")
            .rotate(90.0)
            .add_metadata("title", "x")
            .add_option("-an")
            .output("b.mp4");

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_scalar_setters_overwrite() {
        let descriptor = CommandBuilder::new()
            .input("first.mp4")
            .input("second.mp4")
            .video_codec("libx264")
            .video_codec("libvpx-vp9")
            .crf(30)
            .crf(18)
            .output("b.webm")
            .build();

        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -c:v libvpx-vp9 -crf 18 {{out1}}"
        );
        assert_eq!(descriptor.input_files.get("in1").unwrap(), "second.mp4");
        assert_eq!(descriptor.tokens().filter(|t| *t == "-c:v").count(), 1);
    }

    #[test]
    fn test_unset_options_are_absent() {
        let descriptor = CommandBuilder::new().input("a").output("b").build();
        for flag in [
            "-ss", "-t", "-c:v", "-c:a", "-b:v", "-b:a", "-s", "-r", "-preset", "-crf",
            "-threads", "-loop", "-vf", "-af", "-metadata",
        ] {
            assert!(
                !descriptor.tokens().any(|t| t == flag),
                "unexpected {} in {}",
                flag,
                descriptor.ffmpeg_command
            );
        }
    }

    #[test]
    fn test_each_option_appears_once_at_its_position() {
        let cases: Vec<(CommandBuilder, &str)> = vec![
            (CommandBuilder::new().seek("5"), "-ss 5 -i {{in1}} {{out1}}"),
            (CommandBuilder::new().duration("5"), "-i {{in1}} -t 5 {{out1}}"),
            (CommandBuilder::new().preset("slow"), "-i {{in1}} -preset slow {{out1}}"),
            (CommandBuilder::new().threads(2), "-i {{in1}} -threads 2 {{out1}}"),
            (CommandBuilder::new().size("320x240"), "-i {{in1}} -s 320x240 {{out1}}"),
        ];

        for (builder, expected) in cases {
            assert_eq!(builder.build().ffmpeg_command, expected);
        }
    }

    #[test]
    fn test_seek_before_input_and_duration_after() {
        let descriptor = CommandBuilder::new()
            .duration("00:00:05")
            .seek("00:01:00")
            .input("a.mp4")
            .output("b.mp4")
            .build();
        let tokens: Vec<_> = descriptor.tokens().collect();

        let seek = tokens.iter().position(|t| *t == "-ss").unwrap();
        let input = tokens.iter().position(|t| *t == "{{in1}}").unwrap();
        let duration = tokens.iter().position(|t| *t == "-t").unwrap();
        assert!(seek < input);
        assert!(input < duration);
        assert_eq!(*tokens.last().unwrap(), "{{out1}}");
    }

    #[test]
    fn test_video_filters_aggregate_in_call_order() {
        let descriptor = CommandBuilder::new()
            .add_video_filter("hflip")
            .add_video_filter("hflip")
            .crop(640, 480)
            .crop_at(100, 100, 10, 20)
            .scale(1280)
            .scale_to("iw/2", 360)
            .rotate(45.0)
            .build();

        assert_eq!(descriptor.tokens().filter(|t| *t == "-vf").count(), 1);
        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -vf hflip,hflip,crop=640:480,crop=100:100:10:20,scale=1280:-1,\
             scale=iw/2:360,rotate=45*PI/180 {{out1}}"
        );
    }

    #[test]
    fn test_audio_filters_and_volume() {
        let descriptor = CommandBuilder::new()
            .volume(1.5)
            .add_audio_filter("aresample=48000")
            .build();

        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -af volume=1.5,aresample=48000 {{out1}}"
        );
    }

    #[test]
    fn test_empty_filters_and_options_are_ignored() {
        let builder = CommandBuilder::new()
            .add_video_filter("")
            .add_audio_filter("")
            .add_option("");

        assert!(builder.options().video_filters.is_empty());
        assert!(builder.options().audio_filters.is_empty());
        assert!(builder.options().raw.is_empty());
        assert_eq!(builder.build().ffmpeg_command, "-i {{in1}} {{out1}}");
    }

    #[test]
    fn test_image_sequence_sets_loop_and_fps() {
        let descriptor = CommandBuilder::new()
            .input("still.png")
            .image_sequence(1.0)
            .duration("10")
            .output("slideshow.mp4")
            .build();

        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -t 10 -r 1 -loop 1 {{out1}}"
        );
    }

    #[test]
    fn test_metadata_order_and_overwrite() {
        let descriptor = CommandBuilder::new()
            .add_metadata("title", "Draft")
            .add_metadata("artist", "Band")
            .add_metadata("title", "Final")
            .build();

        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -metadata title=Final -metadata artist=Band {{out1}}"
        );
    }

    #[test]
    fn test_raw_options_follow_structured_options() {
        let descriptor = CommandBuilder::new()
            .add_option("-movflags")
            .add_option("+faststart")
            .add_metadata("comment", "c")
            .video_codec("copy")
            .build();

        assert_eq!(
            descriptor.ffmpeg_command,
            "-i {{in1}} -c:v copy -metadata comment=c -movflags +faststart {{out1}}"
        );
    }

    #[test]
    fn test_placeholders_match_location_maps() {
        let descriptor = CommandBuilder::new()
            .input("main.mp4")
            .add_input("overlay.png")
            .add_input("music.mp3")
            .output("final.mp4")
            .add_output("preview.gif")
            .add_option("-shortest")
            .build();

        let placeholders = descriptor.placeholders();
        let unique: HashSet<_> = placeholders.iter().copied().collect();
        assert_eq!(unique.len(), placeholders.len());

        let mapped: HashSet<_> = descriptor
            .input_files
            .keys()
            .chain(descriptor.output_files.keys())
            .map(String::as_str)
            .collect();
        assert_eq!(unique, mapped);
        assert_eq!(descriptor.input_files.len() + descriptor.output_files.len(), mapped.len());
        assert_eq!(descriptor.location("in3"), Some("music.mp3"));
        assert_eq!(descriptor.location("out2"), Some("preview.gif"));
    }
}
