//! Range restriction of read positions.
//!
//! Confines an index to a closed, inclusive interval with clamp-below /
//! wrap-above semantics: indices at or below the window start collapse to the
//! start, indices above the end wrap forward with period `span + 1`. The
//! asymmetry below the window is intentional — positions before the window
//! are clamped, never wrapped backward.

use crate::source::FrameIndex;

/// Restrict `index` to `[min, max]` by clamping below and modulus wrapping
/// above.
///
/// Caller must guarantee `max > min` (checked with [`is_valid_range`]);
/// behavior for inverted bounds is unspecified.
#[must_use]
pub fn restrict_range(index: FrameIndex, min: FrameIndex, max: FrameIndex) -> FrameIndex {
    let span = max - min;
    ((index - min).max(0) % (span + 1)) + min
}

/// Whether `[start, end]` is a usable restriction window: non-negative
/// bounds with strictly positive width.
///
/// Must be evaluated before every [`restrict_range`] call; when it fails the
/// position passes through unmodified.
#[must_use]
pub fn is_valid_range(start: FrameIndex, end: FrameIndex) -> bool {
    let non_negative = start >= 0 && end >= 0;
    let non_inverted = end > start;
    non_negative && non_inverted
}
