//! Animation frames and their bit-planes.

use std::sync::Arc;

/// One bit-plane: a packed byte buffer holding a single significance bit for
/// every dot of the display.
///
/// Buffers are shared, never mutated. Cloning only bumps a reference count, so
/// the render callback may keep what it receives.
pub type PlaneData = Arc<[u8]>;

/// A plane as stored in an animation, tagged with its marker byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPlane {
    /// Plane tag from the source format.
    pub marker: u8,
    /// Packed plane bits.
    pub data: PlaneData,
}

impl AnimationPlane {
    pub fn new(marker: u8, data: impl Into<PlaneData>) -> Self {
        Self {
            marker,
            data: data.into(),
        }
    }
}

/// A single step of an animation.
///
/// Created once by the loader and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Delay in milliseconds, relative to the previous frame, before this
    /// frame is due.
    pub time_ms: u32,
    /// How long the frame stays on screen. Only the terminal frame's value is
    /// used, as the trailing hold after playback.
    pub hold_ms: u32,
    /// Planes ordered from lowest to highest significance.
    pub planes: Vec<AnimationPlane>,
}

impl AnimationFrame {
    pub fn new(time_ms: u32, hold_ms: u32, planes: Vec<AnimationPlane>) -> Self {
        Self {
            time_ms,
            hold_ms,
            planes,
        }
    }

    /// Number of planes in this frame.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.planes.len()
    }

    /// The frame's own plane buffers, in significance order.
    pub fn plane_data(&self) -> Vec<PlaneData> {
        self.planes.iter().map(|p| Arc::clone(&p.data)).collect()
    }
}
