//! Speed-driven audio transform.
//!
//! Playback rate is altered by rescaling the buffer's presented sample rate
//! rather than resampling the sample data: downstream renderers interpret the
//! same samples at the new rate. Negative speeds additionally reverse the
//! temporal order of sample groups.

use crate::audio::AudioBuffer;

/// Apply a signed speed factor to a buffer.
///
/// The presented sample rate becomes `rate * |speed|` (truncated to the
/// integer rate representation). When `speed` is negative the sample groups
/// are reversed; channel count and format tag are never touched.
///
/// `speed == 0.0` yields a rate of 0. That is a defined degenerate case, not
/// an error; sinks decide how to treat it.
pub fn apply_speed(audio: &mut AudioBuffer, speed: f64) {
    let scaled = audio.sample_rate() as f64 * speed.abs();
    audio.set_sample_rate(scaled as u32);

    if speed < 0.0 {
        audio.reverse_groups();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SampleFormat;

    fn stereo_buffer() -> AudioBuffer {
        AudioBuffer::new(
            vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0],
            SampleFormat::S16,
            48_000,
            2,
        )
    }

    #[test]
    fn positive_speed_scales_rate_keeps_order() {
        let mut buf = stereo_buffer();
        apply_speed(&mut buf, 2.0);

        assert_eq!(buf.sample_rate(), 96_000);
        assert_eq!(buf.samples(), &[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn fractional_speed_truncates_rate() {
        let mut buf = stereo_buffer();
        apply_speed(&mut buf, 0.5);

        assert_eq!(buf.sample_rate(), 24_000);
    }

    #[test]
    fn negative_speed_reverses_sample_groups() {
        let mut buf = stereo_buffer();
        apply_speed(&mut buf, -1.0);

        assert_eq!(buf.sample_rate(), 48_000);
        // Last group first, channels still paired
        assert_eq!(buf.samples(), &[3.0, -3.0, 2.0, -2.0, 1.0, -1.0]);
    }

    #[test]
    fn negative_fast_speed_scales_and_reverses() {
        let mut buf = stereo_buffer();
        apply_speed(&mut buf, -1.5);

        assert_eq!(buf.sample_rate(), 72_000);
        assert_eq!(buf.samples()[0], 3.0);
    }

    #[test]
    fn zero_speed_yields_zero_rate_not_an_error() {
        let mut buf = stereo_buffer();
        apply_speed(&mut buf, 0.0);

        assert_eq!(buf.sample_rate(), 0);
        assert_eq!(buf.samples(), &[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn format_and_channels_are_invariant() {
        let mut buf = stereo_buffer();
        apply_speed(&mut buf, -2.0);

        assert_eq!(buf.format(), SampleFormat::S16);
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.sample_count(), 3);
    }
}
