//! The frame store of one animation.

use std::fmt;
use std::sync::Arc;

use super::frame::AnimationFrame;

/// Ordered, fixed-length frames of one animation plus its identity.
///
/// Frames sit behind an `Arc` so a running schedule can walk them without
/// borrowing the owner.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    offset: u64,
    name: String,
    frames: Arc<[AnimationFrame]>,
}

impl FrameSequence {
    /// Create a sequence.
    ///
    /// `offset` is the byte position of the animation in its source file and
    /// serves as its identity.
    pub fn new(offset: u64, name: impl Into<String>, frames: Vec<AnimationFrame>) -> Self {
        Self {
            offset,
            name: name.into(),
            frames: frames.into(),
        }
    }

    /// Get the offset identifying this animation.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Get the animation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the frames in playback order.
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    pub(crate) fn shared_frames(&self) -> Arc<[AnimationFrame]> {
        Arc::clone(&self.frames)
    }

    /// Number of frames.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Planes per frame, taken from the first frame (0 when empty).
    pub fn bit_length(&self) -> usize {
        self.frames.first().map_or(0, AnimationFrame::bit_length)
    }

    /// Trailing hold after the last frame, in milliseconds (0 when empty).
    pub fn terminal_hold(&self) -> u32 {
        self.frames.last().map_or(0, |f| f.hold_ms)
    }
}

impl fmt::Display for FrameSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} frames", self.name, self.frames.len())
    }
}
