//! Frames and their deferred audio-render chain.
//!
//! A [`Frame`] is one unit of produced media content. It carries a base audio
//! payload and an ordered chain of pending render steps. Steps are attached
//! at production time and resolved last-in-first-out when audio is actually
//! requested: the most recently attached step runs first and pulls "raw"
//! audio from the rest of the chain before applying its own transform, so
//! transforms compose depth-first.

use std::fmt;

use crate::audio::AudioBuffer;
use crate::source::FrameIndex;
use crate::{Result, DEFAULT_SAMPLE_RATE};

/// A deferred audio-render step.
///
/// A step receives the frame it is attached to and must call
/// [`Frame::render_audio`] on it first to obtain upstream audio from the
/// remaining chain, then transform and return the buffer.
pub type AudioRenderStep = Box<dyn FnMut(&mut Frame) -> Result<AudioBuffer> + Send>;

/// One discrete unit of produced media content.
///
/// Ownership passes to the caller at production; the frame (and its audio)
/// has no lifetime beyond the request it was produced for.
pub struct Frame {
    index: FrameIndex,
    audio: AudioBuffer,
    placeholder: bool,
    render_steps: Vec<AudioRenderStep>,
}

impl Frame {
    /// Create a frame carrying real audio content.
    pub fn new(index: FrameIndex, audio: AudioBuffer) -> Self {
        Self {
            index,
            audio,
            placeholder: false,
            render_steps: Vec::new(),
        }
    }

    /// Create a content-less placeholder frame.
    ///
    /// Its audio renders to an empty silent buffer and stays unmodified no
    /// matter what is configured upstream, because suppliers never attach
    /// render steps to placeholders.
    pub fn placeholder(index: FrameIndex) -> Self {
        Self {
            index,
            audio: AudioBuffer::silent(DEFAULT_SAMPLE_RATE, 2, 0),
            placeholder: true,
            render_steps: Vec::new(),
        }
    }

    /// External index this frame was produced for.
    #[must_use]
    pub fn index(&self) -> FrameIndex {
        self.index
    }

    /// Whether this frame carries no real audio content.
    #[must_use]
    pub fn is_placeholder_audio(&self) -> bool {
        self.placeholder
    }

    /// Number of pending render steps.
    #[must_use]
    pub fn pending_render_steps(&self) -> usize {
        self.render_steps.len()
    }

    /// Attach a render step on top of the chain.
    ///
    /// The step runs before everything attached earlier.
    pub fn attach_audio_render_step(&mut self, step: AudioRenderStep) {
        self.render_steps.push(step);
    }

    /// Resolve the audio-render chain and return the rendered audio.
    ///
    /// Pops the most recently attached step and invokes it; the step calls
    /// back into this method to pull audio from the rest of the chain. With
    /// no steps left, the base payload is returned. Each step runs at most
    /// once per frame.
    pub fn render_audio(&mut self) -> Result<AudioBuffer> {
        match self.render_steps.pop() {
            Some(mut step) => step(self),
            None => Ok(self.audio.clone()),
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index)
            .field("placeholder", &self.placeholder)
            .field("render_steps", &self.render_steps.len())
            .field("audio", &self.audio)
            .finish()
    }
}
