//! A concrete frame source backed by a WAV file.
//!
//! [`WavFrameSource`] decodes an entire WAV file up front and slices it into
//! media frames at a fixed frame rate. The read position advances linearly,
//! one frame per production; positions past the end of the media yield
//! placeholder frames. [`WavSourceFactory`] is the matching resource factory.

use std::path::Path;

use crate::audio::{AudioBuffer, SampleFormat};
use crate::frame::Frame;
use crate::source::{FrameIndex, FrameSource, SourceFactory};
use crate::{Result, SourceError, DEFAULT_FRAME_RATE};

/// Frame source slicing a decoded WAV file into fixed-rate media frames.
#[derive(Debug)]
pub struct WavFrameSource {
    samples: Vec<f32>,
    format: SampleFormat,
    sample_rate: u32,
    channels: u16,
    frame_rate: u32,
    position: FrameIndex,
    closed: bool,
}

impl WavFrameSource {
    /// Open and fully decode a WAV file.
    ///
    /// Integer samples are normalized to `[-1.0, 1.0]`; the original bit
    /// depth is kept as the buffer's format tag.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = hound::WavReader::open(path.as_ref())
            .map_err(|e| SourceError::Decode(format!("cannot open WAV: {e}")))?;
        let spec = reader.spec();

        let (samples, format) = decode_samples(reader, spec)?;

        Ok(Self {
            samples,
            format,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            frame_rate: DEFAULT_FRAME_RATE,
            position: 0,
            closed: false,
        })
    }

    /// Use a frame rate other than the default 25 fps.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Result<Self> {
        if frame_rate == 0 {
            return Err(SourceError::Config("frame rate must be non-zero".into()));
        }
        self.frame_rate = frame_rate;
        Ok(self)
    }

    /// Decoded sample rate in Hz.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count of the decoded media.
    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample groups per media frame at the configured frame rate.
    #[must_use]
    pub fn samples_per_frame(&self) -> usize {
        (self.sample_rate / self.frame_rate) as usize
    }

    /// Number of frames the media spans, final partial frame included.
    #[must_use]
    pub fn frame_count(&self) -> FrameIndex {
        let groups = self.samples.len() / self.channels.max(1) as usize;
        let per_frame = self.samples_per_frame().max(1);
        ((groups + per_frame - 1) / per_frame) as FrameIndex
    }
}

fn decode_samples(
    reader: hound::WavReader<std::io::BufReader<std::fs::File>>,
    spec: hound::WavSpec,
) -> Result<(Vec<f32>, SampleFormat)> {
    let decode_err = |e: hound::Error| SourceError::Decode(format!("bad WAV sample: {e}"));

    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => {
            let samples = reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(decode_err)?;
            Ok((samples, SampleFormat::F32))
        }
        (hound::SampleFormat::Int, bits @ (16 | 24 | 32)) => {
            let scale = 1.0 / (1u32 << (bits - 1)) as f32;
            let samples = reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(decode_err)?;
            let format = match bits {
                16 => SampleFormat::S16,
                24 => SampleFormat::S24,
                _ => SampleFormat::S32,
            };
            Ok((samples, format))
        }
        (hound::SampleFormat::Int, bits) => Err(SourceError::Decode(format!(
            "unsupported WAV bit depth: {bits}"
        ))),
    }
}

impl FrameSource for WavFrameSource {
    fn position(&self) -> FrameIndex {
        self.position
    }

    fn set_position(&mut self, position: FrameIndex) {
        self.position = position;
    }

    fn produce_frame(&mut self, index: FrameIndex) -> Result<Frame> {
        if self.closed {
            return Err(SourceError::Closed);
        }

        let frame = if self.position < 0 || self.position >= self.frame_count() {
            Frame::placeholder(index)
        } else {
            let ch = self.channels.max(1) as usize;
            let start = self.position as usize * self.samples_per_frame() * ch;
            let end = (start + self.samples_per_frame() * ch).min(self.samples.len());
            let audio = AudioBuffer::new(
                self.samples[start..end].to_vec(),
                self.format,
                self.sample_rate,
                self.channels,
            );
            Frame::new(index, audio)
        };

        self.position += 1;
        Ok(frame)
    }

    fn seek(&mut self, position: FrameIndex) -> Result<()> {
        self.position = position;
        Ok(())
    }

    fn close(&mut self) {
        self.samples = Vec::new();
        self.closed = true;
    }
}

/// Factory recognizing `.wav` resources.
#[derive(Debug, Default)]
pub struct WavSourceFactory;

impl SourceFactory for WavSourceFactory {
    fn create(&self, resource: &str) -> Option<Box<dyn FrameSource>> {
        if !resource.to_ascii_lowercase().ends_with(".wav") {
            return None;
        }
        match WavFrameSource::open(resource) {
            Ok(source) => Some(Box::new(source)),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 8000 Hz stereo i16 file: 2500 groups = 6.25 frames at 25 fps, each
    /// group's left channel holding its own index scaled to the i16 range.
    fn write_fixture(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("fixture.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for g in 0..2_500i32 {
            writer.write_sample((g % 1_000) as i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn open_decodes_spec_and_normalizes_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);

        let source = WavFrameSource::open(&path).unwrap();
        assert_eq!(source.sample_rate(), 8_000);
        assert_eq!(source.channels(), 2);
        assert_eq!(source.samples_per_frame(), 320); // 8000 / 25
        assert_eq!(source.frame_count(), 8); // ceil(2500 / 320)
        assert_relative_eq!(source.samples[2], 1.0 / 32_768.0, max_relative = 1e-6);
    }

    #[test]
    fn frames_slice_consecutive_sample_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);
        let mut source = WavFrameSource::open(&path).unwrap();

        let mut first = source.produce_frame(0).unwrap();
        let audio = first.render_audio().unwrap();
        assert_eq!(audio.sample_count(), 320);
        assert_eq!(audio.format(), SampleFormat::S16);
        assert_relative_eq!(audio.samples()[0], 0.0);

        // Position advanced; the next frame starts at group 320.
        let mut second = source.produce_frame(1).unwrap();
        let audio = second.render_audio().unwrap();
        assert_relative_eq!(audio.samples()[0], 320.0 / 32_768.0, max_relative = 1e-6);
    }

    #[test]
    fn final_partial_frame_is_short_not_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);
        let mut source = WavFrameSource::open(&path).unwrap();

        source.set_position(7);
        let mut last = source.produce_frame(7).unwrap();
        let audio = last.render_audio().unwrap();
        assert_eq!(audio.sample_count(), 2_500 - 7 * 320);
        assert!(!last.is_placeholder_audio());
    }

    #[test]
    fn positions_past_the_media_yield_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);
        let mut source = WavFrameSource::open(&path).unwrap();

        source.set_position(8);
        let frame = source.produce_frame(8).unwrap();
        assert!(frame.is_placeholder_audio());
        assert_eq!(source.position(), 9); // still advances linearly
    }

    #[test]
    fn custom_frame_rate_changes_slicing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);
        let source = WavFrameSource::open(&path)
            .unwrap()
            .with_frame_rate(50)
            .unwrap();
        assert_eq!(source.samples_per_frame(), 160);
        assert_eq!(source.frame_count(), 16);
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);
        let err = WavFrameSource::open(&path)
            .unwrap()
            .with_frame_rate(0)
            .unwrap_err();
        assert!(matches!(err, SourceError::Config(_)));
    }

    #[test]
    fn factory_recognizes_wav_resources_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir);
        let factory = WavSourceFactory;

        assert!(factory.create(path.to_str().unwrap()).is_some());
        assert!(factory.create("clip.mp3").is_none());
        assert!(factory.create("no-such-file.wav").is_none());
    }
}
