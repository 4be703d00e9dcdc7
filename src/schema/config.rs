//! Configuration types for animation playback.

use serde::{Deserialize, Serialize};

/// Deepest plane count a layout may take from either side.
pub const MAX_PLANES: usize = 8;

/// Default number of low-order planes taken from the live source.
fn default_live_planes() -> usize {
    2
}

/// Default number of high-order planes taken from the animation.
fn default_animation_planes() -> usize {
    2
}

/// How an animation frame is applied to the live picture.
///
/// The mode is chosen when playback starts, not when the animation is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchMode {
    /// Animation planes fully substitute the live picture.
    #[default]
    Replace,
    /// Live picture keeps the low planes, animation adds the high planes.
    Follow,
    /// Same plane merge as `Follow`, masked downstream by the palette stage.
    #[serde(alias = "colormask")]
    ColorMask,
    /// Static replacement; composes like `Replace`.
    Fixed,
}

impl SwitchMode {
    /// True if frames are composed from live and animation planes.
    #[inline]
    pub fn adds_planes(self) -> bool {
        matches!(self, SwitchMode::Follow | SwitchMode::ColorMask)
    }
}

/// Plane split used when enhancing a live picture.
///
/// The composed frame is the first `live_planes` planes of the live source
/// followed by the first `animation_planes` planes of the animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneLayout {
    /// Low-significance planes supplied by the live source.
    #[serde(default = "default_live_planes")]
    pub live_planes: usize,
    /// High-significance planes supplied by the animation.
    #[serde(default = "default_animation_planes")]
    pub animation_planes: usize,
}

impl Default for PlaneLayout {
    fn default() -> Self {
        Self {
            live_planes: default_live_planes(),
            animation_planes: default_animation_planes(),
        }
    }
}

impl PlaneLayout {
    /// Bit depth of a composed frame.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.live_planes + self.animation_planes
    }
}

/// Top-level playback configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Plane split for enhancing modes.
    #[serde(default)]
    pub layout: PlaneLayout,
    /// Mode used by the demo binary when none is given on the command line.
    #[serde(default)]
    pub default_mode: SwitchMode,
}

impl PlaybackConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.live_planes == 0 {
            return Err(ConfigError::NoLivePlanes);
        }
        if self.layout.animation_planes == 0 {
            return Err(ConfigError::NoAnimationPlanes);
        }
        let deepest = self.layout.live_planes.max(self.layout.animation_planes);
        if deepest > MAX_PLANES {
            return Err(ConfigError::TooManyPlanes {
                planes: deepest,
                max: MAX_PLANES,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Plane layout must take at least one plane from the live source")]
    NoLivePlanes,
    #[error("Plane layout must take at least one plane from the animation")]
    NoAnimationPlanes,
    #[error("Plane layout takes {planes} planes from one side, at most {max} are supported")]
    TooManyPlanes { planes: usize, max: usize },
}
