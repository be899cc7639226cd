//! Caller-settable playback configuration.
//!
//! A single shared record owned by the supplier and mutated at arbitrary
//! times. Render steps capture it by reference (behind an `Arc<Mutex<_>>`)
//! and read the speed at render time, so a change made after a frame was
//! produced still affects that frame's audio. This lazy-read behavior is a
//! deliberate contract, not a race.

use serde::{Deserialize, Serialize};

use crate::source::range::is_valid_range;
use crate::source::FrameIndex;

/// Speed and range-restriction settings for a [`crate::VarispeedSource`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Signed speed factor: magnitude scales the presented audio rate, sign
    /// selects forward (non-negative) vs reversed playback.
    pub speed: f64,
    /// Whether range restriction is requested at all.
    pub range_enabled: bool,
    /// First frame of the restriction window (inner-source index units).
    pub range_start: FrameIndex,
    /// Last frame of the restriction window, inclusive.
    pub range_end: FrameIndex,
}

impl PlaybackConfig {
    /// The active restriction window, if any.
    ///
    /// Returns `Some((start, end))` only when restriction is enabled and the
    /// bounds pass the validity check; otherwise the read position must pass
    /// through unmodified.
    #[must_use]
    pub fn restriction(&self) -> Option<(FrameIndex, FrameIndex)> {
        if self.range_enabled && is_valid_range(self.range_start, self.range_end) {
            Some((self.range_start, self.range_end))
        } else {
            None
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            range_enabled: false,
            range_start: 0,
            range_end: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let config = PlaybackConfig::default();
        assert_eq!(config.speed, 1.0);
        assert!(!config.range_enabled);
        assert_eq!(config.restriction(), None);
    }

    #[test]
    fn restriction_requires_enable_flag_and_valid_bounds() {
        let mut config = PlaybackConfig {
            range_start: 10,
            range_end: 20,
            ..Default::default()
        };
        assert_eq!(config.restriction(), None);

        config.range_enabled = true;
        assert_eq!(config.restriction(), Some((10, 20)));

        config.range_end = 10; // zero-width
        assert_eq!(config.restriction(), None);

        config.range_start = -1;
        config.range_end = 5;
        assert_eq!(config.restriction(), None);
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let config = PlaybackConfig {
            speed: -0.5,
            range_enabled: true,
            range_start: 4,
            range_end: 96,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PlaybackConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: PlaybackConfig = serde_json::from_str("{\"speed\": 2.0}").unwrap();
        assert_eq!(config.speed, 2.0);
        assert!(!config.range_enabled);
        assert_eq!(config.range_start, 0);
    }
}
