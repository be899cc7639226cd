//! Frame-source abstractions and the variable-speed supplier.
//!
//! [`FrameSource`] is the single polymorphic seam of the crate: concrete
//! media sources implement it, and [`varispeed::VarispeedSource`] both
//! implements it and consumes another instance of it as its inner source —
//! composition, no shared base type.

pub mod range;
pub mod varispeed;
#[cfg(feature = "wav")]
pub mod wav;

use crate::frame::Frame;
use crate::Result;

/// Frame index / read position in a source's native units.
pub type FrameIndex = i64;

/// A producer of media frames with a linearly-advancing read position.
pub trait FrameSource: Send {
    /// Current read position.
    fn position(&self) -> FrameIndex;

    /// Move the read position without producing a frame.
    fn set_position(&mut self, position: FrameIndex);

    /// Produce the frame for the given external index.
    ///
    /// The returned status is authoritative; implementations must not
    /// swallow their own failures.
    fn produce_frame(&mut self, index: FrameIndex) -> Result<Frame>;

    /// Seek to a position.
    fn seek(&mut self, position: FrameIndex) -> Result<()>;

    /// Release any resources held by the source.
    ///
    /// Must be safe to call more than once; later calls are no-ops.
    fn close(&mut self) {}

    /// Pin the source's own playback rate.
    ///
    /// Default is a no-op: most sources have no native rate control. Wrappers
    /// call this with `1.0` so all presented speed variation stays in the
    /// audio-render layer.
    fn set_native_speed(&mut self, _speed: f64) {}
}

/// Creates frame sources from opaque resource identifiers.
///
/// A factory may fail for unrecognized or unreadable resources, in which
/// case it returns `None` and the caller reports construction failure.
pub trait SourceFactory {
    /// Create a source for `resource`, or `None` if it cannot be handled.
    fn create(&self, resource: &str) -> Option<Box<dyn FrameSource>>;
}
