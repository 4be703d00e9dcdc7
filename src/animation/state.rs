//! Per-animation run state.
//!
//! Every transition is tagged with the generation of the run that requested
//! it. Starting or stopping bumps the generation, which turns any timer still
//! in flight for an older run into a no-op.

use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use super::frame::PlaneData;
use crate::schema::SwitchMode;

/// Where an animation is in its playback lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Never started.
    #[default]
    Idle,
    /// Walking the frames.
    Running,
    /// All frames delivered, waiting out the trailing hold.
    Completing,
    /// Finished naturally or stopped.
    Stopped,
}

/// Mutable state of the current run.
#[derive(Debug)]
pub(crate) struct PlaybackState {
    phase: PlaybackPhase,
    running: bool,
    frame_index: usize,
    switch_mode: SwitchMode,
    live_frame: Arc<[PlaneData]>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            running: false,
            frame_index: 0,
            switch_mode: SwitchMode::default(),
            live_frame: Arc::from(Vec::new()),
            generation: 0,
            task: None,
        }
    }
}

impl PlaybackState {
    pub(crate) fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    /// Frames handed to the render callback in the current run.
    pub(crate) fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub(crate) fn switch_mode(&self) -> SwitchMode {
        self.switch_mode
    }

    /// Latest live frame snapshot.
    pub(crate) fn live_frame(&self) -> &Arc<[PlaneData]> {
        &self.live_frame
    }

    /// True while `generation` is the active, running run.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }

    /// Begin a new run and return its generation.
    pub(crate) fn begin(&mut self, mode: SwitchMode, live_frame: Arc<[PlaneData]>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.phase = PlaybackPhase::Running;
        self.running = true;
        self.frame_index = 0;
        self.switch_mode = mode;
        self.live_frame = live_frame;
        self.generation
    }

    /// Invalidate the current run, returning its task handle if any.
    ///
    /// A no-op apart from the generation bump when nothing is running.
    pub(crate) fn cancel(&mut self) -> Option<JoinHandle<()>> {
        self.generation = self.generation.wrapping_add(1);
        if self.running {
            self.running = false;
            self.phase = PlaybackPhase::Stopped;
        }
        self.task.take()
    }

    /// Replace the live frame snapshot.
    pub(crate) fn set_live_frame(&mut self, live_frame: Arc<[PlaneData]>) {
        self.live_frame = live_frame;
    }

    /// Keep the task driving `generation`. Returns the handle back if that
    /// run has already been superseded.
    pub(crate) fn attach(
        &mut self,
        generation: u64,
        task: JoinHandle<()>,
    ) -> Option<JoinHandle<()>> {
        if self.generation == generation {
            self.task = Some(task);
            None
        } else {
            Some(task)
        }
    }

    /// Count one delivered frame.
    pub(crate) fn record_delivery(&mut self) {
        self.frame_index += 1;
    }

    /// Enter the trailing hold. False if `generation` is no longer current.
    pub(crate) fn enter_hold(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = PlaybackPhase::Completing;
        true
    }

    /// Mark the run as finished.
    pub(crate) fn finish(&mut self) {
        self.running = false;
        self.phase = PlaybackPhase::Stopped;
    }

    /// Stop `generation` if it is still current. Used when its task dies.
    pub(crate) fn abandon(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.finish();
        true
    }
}

/// State shared between an [`Animation`](super::Animation) and its schedule.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    state: Mutex<PlaybackState>,
    /// Held while a callback runs, so cancelling can wait for it.
    delivery: Mutex<()>,
}

impl Shared {
    pub(crate) fn state(&self) -> MutexGuard<'_, PlaybackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit on behalf of `generation`, serialized against [`Shared::cancel`].
    ///
    /// `prepare` runs under the state lock, `emit` runs with only the
    /// delivery lock held so callbacks may call back into the animation.
    pub(crate) fn deliver<T>(
        &self,
        generation: u64,
        prepare: impl FnOnce(&mut PlaybackState) -> T,
        emit: impl FnOnce(T),
    ) -> bool {
        let _slot = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        let prepared = {
            let mut state = self.state();
            if !state.is_current(generation) {
                return false;
            }
            prepare(&mut state)
        };
        let _depth = CallbackDepth::enter();
        emit(prepared);
        true
    }

    /// Invalidate the current run and abort its task.
    ///
    /// Once this returns no callback of the cancelled run will start. Called
    /// from outside any playback callback it also waits for one still
    /// running on another thread. Called from inside a callback (of this or
    /// any other animation) it never blocks. Returns whether a run was active.
    pub(crate) fn cancel(&self) -> bool {
        let (task, was_running) = {
            let mut state = self.state();
            let was_running = state.is_running();
            (state.cancel(), was_running)
        };
        if let Some(task) = task {
            task.abort();
        }
        if !CallbackDepth::active() {
            drop(self.delivery.lock().unwrap_or_else(PoisonError::into_inner));
        }
        was_running
    }
}

thread_local! {
    /// Number of playback callbacks running on this thread.
    static CALLBACK_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Marks the current thread as running a playback callback while alive.
struct CallbackDepth;

impl CallbackDepth {
    fn enter() -> Self {
        CALLBACK_DEPTH.with(|depth| depth.set(depth.get() + 1));
        CallbackDepth
    }

    fn active() -> bool {
        CALLBACK_DEPTH.with(|depth| depth.get() > 0)
    }
}

impl Drop for CallbackDepth {
    fn drop(&mut self) {
        CALLBACK_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
