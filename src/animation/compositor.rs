//! Plane composition of live and animation frames.
//!
//! In enhancing modes the live picture keeps its low-order planes and the
//! animation stacks its planes on top, widening e.g. a 2-bit live frame to 4
//! bits. All other modes show the animation frame as is.

use std::sync::Arc;

use super::frame::{AnimationFrame, PlaneData};
use crate::schema::{PlaneLayout, SwitchMode};

/// Errors raised when inputs are too shallow for the plane layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositeError {
    #[error("Live frame has {actual} planes, layout needs {expected}")]
    MissingLivePlanes { expected: usize, actual: usize },
    #[error("Animation frame has {actual} planes, layout needs {expected}")]
    MissingAnimationPlanes { expected: usize, actual: usize },
}

/// Compose the planes to render for one animation frame.
///
/// Enhancing modes yield `live[..K]` followed by the first `M` animation
/// planes, with `K`/`M` from `layout`. Other modes yield the frame's own
/// planes and ignore `live`. Buffers are shared, never copied or modified.
pub fn composite(
    live: &[PlaneData],
    frame: &AnimationFrame,
    mode: SwitchMode,
    layout: &PlaneLayout,
) -> Result<Vec<PlaneData>, CompositeError> {
    if !mode.adds_planes() {
        return Ok(frame.plane_data());
    }
    check_live(live, layout)?;
    check_animation(frame.bit_length(), layout)?;

    let mut planes = Vec::with_capacity(layout.bit_length());
    planes.extend(live[..layout.live_planes].iter().cloned());
    planes.extend(
        frame.planes[..layout.animation_planes]
            .iter()
            .map(|p| Arc::clone(&p.data)),
    );
    Ok(planes)
}

/// Check that a live frame carries enough planes for `layout`.
pub fn check_live(live: &[PlaneData], layout: &PlaneLayout) -> Result<(), CompositeError> {
    if live.len() < layout.live_planes {
        return Err(CompositeError::MissingLivePlanes {
            expected: layout.live_planes,
            actual: live.len(),
        });
    }
    Ok(())
}

/// Check that animation frames of `bit_length` planes fit `layout`.
pub fn check_animation(bit_length: usize, layout: &PlaneLayout) -> Result<(), CompositeError> {
    if bit_length < layout.animation_planes {
        return Err(CompositeError::MissingAnimationPlanes {
            expected: layout.animation_planes,
            actual: bit_length,
        });
    }
    Ok(())
}
