//! Bit-plane animation playback.
//!
//! An animation is a fixed sequence of frames, each made of bit-planes
//! (one significance bit per dot, lowest plane first). Playback replays the
//! frames against a live picture with frame-accurate relative delays, either
//! replacing the live picture or enhancing it:
//!
//! ```text
//! Replace / Fixed:     render(frame.planes)
//! Follow / ColorMask:  render(live[0..K] ++ frame.planes[0..M])   K = M = 2 by default
//!
//! time ──► delay0 ─► #0 ─ delay1 ─► #1 ─ ... ─► #n-1 ─ hold(#n-1) ─► completed()
//! ```
//!
//! Playback runs on a tokio runtime. A run can be stopped or restarted at
//! any point; stale timers of a superseded run never reach the callbacks.

mod compositor;
mod frame;
mod player;
mod scheduler;
mod sequence;
mod state;

pub use compositor::{CompositeError, check_animation, check_live, composite};
pub use frame::{AnimationFrame, AnimationPlane, PlaneData};
pub use player::{Animation, PlaybackError};
pub use scheduler::{CompletedFn, RenderFn};
pub use sequence::FrameSequence;
pub use state::PlaybackPhase;
