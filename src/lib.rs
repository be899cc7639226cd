//! Variable-speed media frame supplier
//!
//! `varisource` presents an underlying, linearly-advancing media frame source
//! as a variable-speed, optionally range-restricted playback source. Callers
//! request frames by index; the supplier optionally confines the inner
//! source's read position to a closed frame-index range via wraparound, and
//! attaches a deferred audio-render step that rescales and optionally
//! time-reverses each frame's audio according to a signed speed factor.
//!
//! # Features
//! - Range restriction of the inner read position (clamp below the window,
//!   inclusive modulus wrap above it)
//! - Signed speed factor: magnitude scales the presented sample rate, sign
//!   selects forward vs temporally reversed audio
//! - Lazy audio rendering: the transform runs only when frame audio is
//!   actually requested, and reads the speed in effect at render time
//! - Pluggable inner sources via the [`FrameSource`] trait
//!
//! # Crate feature flags
//! - `wav` (default): WAV-backed inner source, WAV export and the CLI demo
//!   (enables the optional `hound` dep)
//!
//! # Quick start
//! ## Wrap a source and loop a frame range
//! ```no_run
//! use varisource::{VarispeedSource, WavSourceFactory, FrameSource};
//!
//! let factory = WavSourceFactory::default();
//! let mut source = VarispeedSource::from_resource("drums.wav", &factory).unwrap();
//! source.set_range(120, 180);
//! source.set_range_enabled(true);
//! source.set_speed(-1.5);
//!
//! let mut frame = source.produce_frame(0).unwrap();
//! let audio = frame.render_audio().unwrap(); // reversed, rate * 1.5
//! # let _ = audio;
//! ```

#![warn(missing_docs)]

// Domain modules (WAV support is feature-gated for modular use)
pub mod audio; // Audio buffers and the speed transform
pub mod config; // Caller-settable playback configuration
#[cfg(feature = "wav")]
pub mod export; // WAV rendering of a frame source
pub mod frame; // Frames and their deferred audio-render chain
pub mod source; // Frame-source traits, range restriction, the supplier

/// Error types for frame-source operations
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// No resource identifier was supplied at construction
    #[error("Missing resource identifier")]
    MissingResource,

    /// The factory could not create an inner source for the resource
    #[error("Could not create a source for resource '{0}'")]
    SourceCreation(String),

    /// The source has already been closed
    #[error("Source is closed")]
    Closed,

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding media data
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for SourceError {
    /// Converts a String into `SourceError::Other`.
    ///
    /// Convenience for generic string errors; prefer the specific variant
    /// constructors when the failure class is known.
    fn from(msg: String) -> Self {
        SourceError::Other(msg)
    }
}

impl From<&str> for SourceError {
    /// Converts a string slice into `SourceError::Other`.
    fn from(msg: &str) -> Self {
        SourceError::Other(msg.to_string())
    }
}

/// Result type for frame-source operations
pub type Result<T> = std::result::Result<T, SourceError>;

// Public API exports
pub use audio::speed::apply_speed;
pub use audio::{AudioBuffer, SampleFormat};
pub use config::PlaybackConfig;
#[cfg(feature = "wav")]
pub use export::export_to_wav;
pub use frame::{AudioRenderStep, Frame};
pub use source::range::{is_valid_range, restrict_range};
pub use source::varispeed::VarispeedSource;
#[cfg(feature = "wav")]
pub use source::wav::{WavFrameSource, WavSourceFactory};
pub use source::{FrameIndex, FrameSource, SourceFactory};

// ============================================================================
// Common Constants
// ============================================================================

/// Standard audio sample rate (44.1 kHz CD quality).
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default media frame rate (25 fps PAL video timing).
pub const DEFAULT_FRAME_RATE: u32 = 25;
