//! Bit-plane animation playback for dot-matrix displays.
//!
//! This crate replays pre-loaded animations on a monochrome or gray-scale
//! dot-matrix display driven by successive binary planes. An animation either
//! replaces the live picture or widens it, the live source supplying the low
//! planes and the animation the high ones.
//!
//! # Architecture
//!
//! - `schema`: Configuration types and plain display data
//! - `animation`: Frames, plane composition and the playback schedule
//!
//! # Example
//!
//! ```rust,no_run
//! use dmd_animation::{
//!     animation::{Animation, AnimationFrame, AnimationPlane, FrameSequence},
//!     schema::SwitchMode,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frames = vec![
//!     AnimationFrame::new(100, 0, vec![AnimationPlane::new(0, vec![0u8; 512])]),
//!     AnimationFrame::new(50, 500, vec![AnimationPlane::new(0, vec![0xFFu8; 512])]),
//! ];
//! let animation = Animation::new(FrameSequence::new(0, "intro", frames));
//!
//! animation.start(
//!     SwitchMode::Replace,
//!     Vec::new(),
//!     |planes| println!("render {} planes", planes.len()),
//!     Some(Box::new(|| println!("done"))),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod schema;

// Re-export commonly used types
pub use animation::{Animation, AnimationFrame, FrameSequence, PlaneData, PlaybackError};
pub use schema::{PlaneLayout, PlaybackConfig, SwitchMode};
