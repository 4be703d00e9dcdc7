//! Timer chain driving one playback run.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{error, info, trace, warn};
use tokio::time::sleep;

use super::compositor::composite;
use super::frame::{AnimationFrame, PlaneData};
use super::state::Shared;
use crate::schema::{PlaneLayout, SwitchMode};

/// Render callback, invoked once per delivered frame.
pub type RenderFn = Box<dyn FnMut(Vec<PlaneData>) + Send + 'static>;

/// Completion callback, invoked once when playback finishes naturally.
pub type CompletedFn = Box<dyn FnOnce() + Send + 'static>;

/// Everything a single run needs, moved into its task.
pub(crate) struct Run {
    pub(crate) shared: Arc<Shared>,
    pub(crate) generation: u64,
    pub(crate) frames: Arc<[AnimationFrame]>,
    pub(crate) mode: SwitchMode,
    pub(crate) layout: PlaneLayout,
    /// Trailing hold after the last frame.
    pub(crate) hold_ms: u32,
    pub(crate) render: RenderFn,
    pub(crate) completed: Option<CompletedFn>,
}

impl Run {
    /// Walk the frames, then wait out the terminal frame's hold.
    ///
    /// Each delay counts from the delivery of the previous frame. A late
    /// wakeup delivers late; frames are never skipped or reordered.
    pub(crate) async fn drive(mut self) {
        let _guard = AbandonGuard {
            shared: Arc::clone(&self.shared),
            generation: self.generation,
        };
        let frames = Arc::clone(&self.frames);

        for (n, frame) in frames.iter().enumerate() {
            sleep(Duration::from_millis(frame.time_ms.into())).await;
            if !self.deliver(frame) {
                return;
            }
            trace!("Frame #{} delivered ({} ms delay)", n, frame.time_ms);
        }

        let hold = self.hold_ms;
        if !self.shared.state().enter_hold(self.generation) {
            return;
        }
        trace!("Last frame delivered, holding {} ms", hold);
        sleep(Duration::from_millis(hold.into())).await;

        let completed = self.completed.take();
        self.shared.deliver(
            self.generation,
            |state| state.finish(),
            |()| {
                info!("Animation completed after {} frames", frames.len());
                if let Some(completed) = completed {
                    completed();
                }
            },
        );
    }

    fn deliver(&mut self, frame: &AnimationFrame) -> bool {
        let mode = self.mode;
        let layout = self.layout;
        let render = &mut self.render;
        self.shared.deliver(
            self.generation,
            |state| {
                state.record_delivery();
                match composite(state.live_frame(), frame, mode, &layout) {
                    Ok(planes) => planes,
                    Err(err) => {
                        warn!("Showing animation planes only: {}", err);
                        frame.plane_data()
                    }
                }
            },
            |planes| render(planes),
        )
    }
}

/// Stops the run if its task ends early, e.g. when a callback panics or the
/// runtime shuts down.
struct AbandonGuard {
    shared: Arc<Shared>,
    generation: u64,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        let mut state = self.shared.state();
        if state.abandon(self.generation) {
            if thread::panicking() {
                error!(
                    "Playback callback panicked, stopped after {} frames",
                    state.frame_index()
                );
            } else {
                warn!(
                    "Playback task dropped, stopped after {} frames",
                    state.frame_index()
                );
            }
        }
    }
}
