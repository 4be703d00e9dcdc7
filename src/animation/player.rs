//! Animation playback against a live picture.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::runtime::Handle;

use super::compositor::{CompositeError, check_animation, check_live};
use super::frame::PlaneData;
use super::scheduler::{CompletedFn, Run};
use super::sequence::FrameSequence;
use super::state::{PlaybackPhase, Shared};
use crate::schema::{PlaneLayout, SwitchMode};

/// Playback errors.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("No tokio runtime available to schedule playback")]
    NoRuntime,
    #[error(transparent)]
    Composite(#[from] CompositeError),
}

/// A loaded animation and its playback schedule.
///
/// Usage:
/// ```ignore
/// let animation = Animation::new(sequence);
/// animation.start(SwitchMode::Follow, live_planes, |planes| dmd.render(planes), None)?;
/// // for every new frame of the live source:
/// animation.next_frame(live_planes)?;
/// ```
///
/// Frames are delivered asynchronously on the tokio runtime; `start` and
/// `stop` return immediately. At most one schedule is active per animation.
///
/// Two animations are equal when their offsets are, whatever their content.
pub struct Animation {
    sequence: FrameSequence,
    layout: PlaneLayout,
    runtime: Option<Handle>,
    shared: Arc<Shared>,
}

impl Animation {
    /// Wrap a loaded sequence. Playback uses the default 2+2 layout.
    pub fn new(sequence: FrameSequence) -> Self {
        Self {
            sequence,
            layout: PlaneLayout::default(),
            runtime: None,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Use a custom plane split for enhancing modes.
    pub fn with_layout(mut self, layout: PlaneLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Schedule on `runtime` instead of the runtime `start` is called from.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Get the frame sequence.
    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    /// Get the plane layout used by enhancing modes.
    pub fn layout(&self) -> &PlaneLayout {
        &self.layout
    }

    /// Get the animation name.
    pub fn name(&self) -> &str {
        self.sequence.name()
    }

    /// Get the offset identifying this animation.
    pub fn offset(&self) -> u64 {
        self.sequence.offset()
    }

    /// Get the number of frames.
    pub fn num_frames(&self) -> usize {
        self.sequence.num_frames()
    }

    /// Get the number of planes per animation frame.
    pub fn bit_length(&self) -> usize {
        self.sequence.bit_length()
    }

    /// True from `start` until the trailing hold has elapsed or `stop` is called.
    pub fn is_running(&self) -> bool {
        self.shared.state().is_running()
    }

    /// Get the lifecycle phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.shared.state().phase()
    }

    /// Frames delivered in the current (or last) run.
    pub fn frame_index(&self) -> usize {
        self.shared.state().frame_index()
    }

    /// Frames still to be delivered.
    pub fn remaining_frames(&self) -> usize {
        let delivered = self.shared.state().frame_index();
        self.num_frames().saturating_sub(delivered)
    }

    /// Mode of the current (or last) run.
    pub fn switch_mode(&self) -> SwitchMode {
        self.shared.state().switch_mode()
    }

    /// Whether the current run composes live and animation planes.
    pub fn add_planes(&self) -> bool {
        self.switch_mode().adds_planes()
    }

    /// Start playback, cancelling any run already in progress.
    ///
    /// `first_frame` is the live picture that triggered the animation; it is
    /// only read in enhancing modes. `render` receives the planes of every
    /// frame, `completed` fires once after the trailing hold unless the run
    /// is stopped or superseded first. An empty animation renders nothing and
    /// completes right away.
    pub fn start(
        &self,
        mode: SwitchMode,
        first_frame: Vec<PlaneData>,
        render: impl FnMut(Vec<PlaneData>) + Send + 'static,
        completed: Option<CompletedFn>,
    ) -> Result<(), PlaybackError> {
        let runtime = match &self.runtime {
            Some(handle) => handle.clone(),
            None => Handle::try_current().map_err(|_| PlaybackError::NoRuntime)?,
        };
        if mode.adds_planes() && self.num_frames() > 0 {
            check_live(&first_frame, &self.layout)?;
            check_animation(self.bit_length(), &self.layout)?;
        }

        if self.shared.cancel() {
            debug!("[{}] Restarting, previous run cancelled", self.sequence);
        }
        let generation = self.shared.state().begin(mode, first_frame.into());

        if mode.adds_planes() {
            info!("Starting enhanced animation of {} frames...", self.num_frames());
        } else {
            info!("Starting replacing animation of {} frames...", self.num_frames());
        }

        let run = Run {
            shared: Arc::clone(&self.shared),
            generation,
            frames: self.sequence.shared_frames(),
            mode,
            layout: self.layout,
            hold_ms: self.sequence.terminal_hold(),
            render: Box::new(render),
            completed,
        };
        let task = runtime.spawn(run.drive());
        if let Some(stale) = self.shared.state().attach(generation, task) {
            stale.abort();
        }
        Ok(())
    }

    /// Update the live picture used for the next enhanced frame.
    ///
    /// Never renders by itself. While an enhancing run is active, a frame
    /// with fewer planes than the layout needs is rejected and the previous
    /// one kept.
    pub fn next_frame(&self, planes: Vec<PlaneData>) -> Result<(), PlaybackError> {
        let mut state = self.shared.state();
        if state.is_running() && state.switch_mode().adds_planes() {
            if let Err(err) = check_live(&planes, &self.layout) {
                warn!("[{}] Ignoring live frame: {}", self.sequence, err);
                return Err(err.into());
            }
        }
        state.set_live_frame(planes.into());
        Ok(())
    }

    /// Stop playback. Idempotent; never fires the completion callback.
    ///
    /// Once this returns no callback of the stopped run starts anymore, and
    /// none is still running unless `stop` was itself called from inside a
    /// playback callback. In that case it returns without waiting.
    pub fn stop(&self) {
        if self.shared.cancel() {
            debug!(
                "[{}] Stopped after {} frames",
                self.sequence,
                self.frame_index()
            );
        }
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

impl PartialEq for Animation {
    fn eq(&self, other: &Self) -> bool {
        self.offset() == other.offset()
    }
}

impl Eq for Animation {}

impl Hash for Animation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset().hash(state);
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.sequence, f)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("offset", &self.offset())
            .field("name", &self.name())
            .field("num_frames", &self.num_frames())
            .field("phase", &self.phase())
            .finish()
    }
}
