//! Audio buffers flowing through the render chain.
//!
//! An [`AudioBuffer`] is a transient value passed between audio-render steps:
//! interleaved f32 samples plus the metadata a downstream renderer needs to
//! interpret them. Buffers have no persistent identity; each render step
//! consumes one and may replace its contents.

pub mod speed;

/// Native sample format of the media the buffer was decoded from.
///
/// The tag travels with the buffer so sinks can pick a matching output
/// encoding; sample data itself is always normalized interleaved f32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// 32-bit float samples
    #[default]
    F32,
    /// Signed 16-bit integer samples
    S16,
    /// Signed 24-bit integer samples
    S24,
    /// Signed 32-bit integer samples
    S32,
}

/// Interleaved audio for one frame: sample data, format tag, rate and
/// channel count.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    format: SampleFormat,
    sample_rate: u32,
    channels: u16,
}

impl AudioBuffer {
    /// Create a buffer from interleaved samples.
    pub fn new(samples: Vec<f32>, format: SampleFormat, sample_rate: u32, channels: u16) -> Self {
        debug_assert!(
            channels == 0 || samples.len() % channels as usize == 0,
            "sample data must be a whole number of sample groups"
        );
        Self {
            samples,
            format,
            sample_rate,
            channels,
        }
    }

    /// Create a zero-filled buffer of `frames` sample groups.
    pub fn silent(sample_rate: u32, channels: u16, frames: usize) -> Self {
        Self {
            samples: vec![0.0; frames * channels as usize],
            format: SampleFormat::default(),
            sample_rate,
            channels,
        }
    }

    /// Interleaved sample data.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutable access to the interleaved sample data.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Native sample format tag.
    #[must_use]
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Presented sample rate in Hz.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Replace the presented sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    /// Number of interleaved channels.
    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample groups (one group = one sample per channel).
    #[must_use]
    pub fn sample_count(&self) -> usize {
        match self.channels {
            0 => 0,
            ch => self.samples.len() / ch as usize,
        }
    }

    /// Reverse the temporal order of sample groups in place.
    ///
    /// Each multi-channel group is moved as a unit, so interleaving within a
    /// group is preserved.
    pub fn reverse_groups(&mut self) {
        let ch = self.channels.max(1) as usize;
        let groups = self.samples.len() / ch;
        for g in 0..groups / 2 {
            let a = g * ch;
            let b = (groups - 1 - g) * ch;
            for k in 0..ch {
                self.samples.swap(a + k, b + k);
            }
        }
    }
}
