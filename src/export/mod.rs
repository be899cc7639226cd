//! Rendering a frame source's audio to a WAV file.

use std::path::Path;

use crate::source::{FrameIndex, FrameSource};
use crate::{Result, SourceError};

/// Render `frame_count` frames from `source` and write their audio to a
/// 16-bit PCM WAV file.
///
/// The first rendered buffer fixes the output spec (sample rate and channel
/// count); later buffers are written as-is. A zero output rate — the result
/// of exporting at speed 0 — is rejected with [`SourceError::Config`], since
/// WAV cannot represent it.
///
/// # Examples
///
/// ```no_run
/// use varisource::{export_to_wav, VarispeedSource, WavSourceFactory};
///
/// # fn main() -> varisource::Result<()> {
/// let mut source = VarispeedSource::from_resource("clip.wav", &WavSourceFactory)?;
/// source.set_speed(-1.0);
/// export_to_wav(&mut source, 250, "reversed.wav")?;
/// # Ok(())
/// # }
/// ```
pub fn export_to_wav<P: AsRef<Path>>(
    source: &mut dyn FrameSource,
    frame_count: FrameIndex,
    output_path: P,
) -> Result<()> {
    let mut writer: Option<hound::WavWriter<std::io::BufWriter<std::fs::File>>> = None;

    for index in 0..frame_count {
        let mut frame = source.produce_frame(index)?;
        let audio = frame.render_audio()?;

        if audio.sample_count() == 0 {
            continue;
        }

        if writer.is_none() {
            if audio.sample_rate() == 0 {
                return Err(SourceError::Config(
                    "cannot export at sample rate 0 (speed 0)".into(),
                ));
            }
            let spec = hound::WavSpec {
                channels: audio.channels(),
                sample_rate: audio.sample_rate(),
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };
            let w = hound::WavWriter::create(output_path.as_ref(), spec)
                .map_err(|e| SourceError::Other(format!("cannot create WAV file: {e}")))?;
            writer = Some(w);
        }

        if let Some(writer) = writer.as_mut() {
            for &sample in audio.samples() {
                let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(sample_i16)
                    .map_err(|e| SourceError::Other(format!("cannot write sample: {e}")))?;
            }
        }
    }

    if let Some(writer) = writer {
        writer
            .finalize()
            .map_err(|e| SourceError::Other(format!("cannot finalize WAV file: {e}")))?;
    }

    Ok(())
}
