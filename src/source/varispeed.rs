//! The variable-speed, range-restricted frame supplier.
//!
//! [`VarispeedSource`] wraps an inner [`FrameSource`] and changes its
//! presentation in two ways: before each frame request the inner read
//! position is optionally confined to a configured frame range, and every
//! frame carrying real audio gets a deferred render step that rescales (and
//! for negative speeds reverses) its audio. The inner source itself always
//! runs at its neutral rate; all presented speed lives in the render step.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::audio::speed::apply_speed;
use crate::config::PlaybackConfig;
use crate::frame::Frame;
use crate::source::range::restrict_range;
use crate::source::{FrameIndex, FrameSource, SourceFactory};
use crate::{Result, SourceError};

/// A frame source that presents another source at variable speed, optionally
/// confined to a closed frame range.
pub struct VarispeedSource {
    inner: Option<Box<dyn FrameSource>>,
    config: Arc<Mutex<PlaybackConfig>>,
    resource: String,
}

impl std::fmt::Debug for VarispeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarispeedSource")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl VarispeedSource {
    /// Create a supplier for `resource`, building the inner source through
    /// `factory`.
    ///
    /// Fails with [`SourceError::MissingResource`] for an empty resource and
    /// [`SourceError::SourceCreation`] when the factory cannot handle it.
    /// On success the inner source's native rate is pinned to 1.0.
    pub fn from_resource(resource: &str, factory: &dyn SourceFactory) -> Result<Self> {
        if resource.is_empty() {
            return Err(SourceError::MissingResource);
        }

        let inner = factory
            .create(resource)
            .ok_or_else(|| SourceError::SourceCreation(resource.to_string()))?;

        let mut source = Self::wrap(inner);
        source.resource = resource.to_string();
        Ok(source)
    }

    /// Wrap an already-constructed inner source.
    pub fn wrap(mut inner: Box<dyn FrameSource>) -> Self {
        // The presented speed is applied at the audio-render layer only;
        // the inner source keeps producing at its neutral rate.
        inner.set_native_speed(1.0);

        Self {
            inner: Some(inner),
            config: Arc::new(Mutex::new(PlaybackConfig::default())),
            resource: String::new(),
        }
    }

    /// The resource identifier this supplier was created from.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Current signed speed factor.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.config.lock().speed
    }

    /// Set the signed speed factor.
    ///
    /// Takes effect for every audio render from now on, including frames
    /// already produced but not yet rendered.
    pub fn set_speed(&mut self, speed: f64) {
        self.config.lock().speed = speed;
    }

    /// Whether range restriction is requested.
    #[must_use]
    pub fn range_enabled(&self) -> bool {
        self.config.lock().range_enabled
    }

    /// Enable or disable range restriction.
    pub fn set_range_enabled(&mut self, enabled: bool) {
        self.config.lock().range_enabled = enabled;
    }

    /// First frame of the restriction window.
    #[must_use]
    pub fn range_start(&self) -> FrameIndex {
        self.config.lock().range_start
    }

    /// Set the first frame of the restriction window.
    pub fn set_range_start(&mut self, start: FrameIndex) {
        self.config.lock().range_start = start;
    }

    /// Last frame of the restriction window, inclusive.
    #[must_use]
    pub fn range_end(&self) -> FrameIndex {
        self.config.lock().range_end
    }

    /// Set the last frame of the restriction window.
    pub fn set_range_end(&mut self, end: FrameIndex) {
        self.config.lock().range_end = end;
    }

    /// Set both restriction bounds at once.
    pub fn set_range(&mut self, start: FrameIndex, end: FrameIndex) {
        let mut config = self.config.lock();
        config.range_start = start;
        config.range_end = end;
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> PlaybackConfig {
        *self.config.lock()
    }

    fn inner_mut(&mut self) -> Result<&mut Box<dyn FrameSource>> {
        self.inner.as_mut().ok_or(SourceError::Closed)
    }
}

impl FrameSource for VarispeedSource {
    fn position(&self) -> FrameIndex {
        self.inner.as_ref().map_or(0, |inner| inner.position())
    }

    fn set_position(&mut self, position: FrameIndex) {
        if let Some(inner) = self.inner.as_mut() {
            inner.set_position(position);
        }
    }

    fn produce_frame(&mut self, index: FrameIndex) -> Result<Frame> {
        let config = Arc::clone(&self.config);
        let restriction = config.lock().restriction();
        let inner = self.inner_mut()?;

        // Step 1: remap the inner read position when a valid window is active.
        if let Some((start, end)) = restriction {
            let position = inner.position();
            inner.set_position(restrict_range(position, start, end));
        }

        // Step 2: delegate. The inner status is authoritative for the request.
        let mut frame = inner.produce_frame(index)?;

        // Step 3: defer the speed transform until audio is actually wanted.
        // The step reads the speed in effect at render time, not attach time.
        if !frame.is_placeholder_audio() {
            frame.attach_audio_render_step(Box::new(move |frame| {
                let mut audio = frame.render_audio()?;
                let speed = config.lock().speed;
                apply_speed(&mut audio, speed);
                Ok(audio)
            }));
        }

        Ok(frame)
    }

    fn seek(&mut self, position: FrameIndex) -> Result<()> {
        // Pass-through: restriction applies at the next frame production.
        self.inner_mut()?.seek(position)
    }

    fn close(&mut self) {
        // Release the inner source first, exactly once. Safe against partial
        // construction (no inner) and repeated calls.
        if let Some(mut inner) = self.inner.take() {
            inner.close();
        }
    }
}

impl Drop for VarispeedSource {
    fn drop(&mut self) {
        self.close();
    }
}
