use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::context::WarpContext;
use super::easing::{lerp, power2_in, power2_out};

/// Whether the browser can animate the transition at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Available,
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Entering,
    Midpoint,
    Exiting,
}

/// Visual state of the overlay and of the page content for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub overlay_opacity: f64,
    pub content_scale: f64,
    pub content_opacity: f64,
}

impl TransitionFrame {
    pub const REST: TransitionFrame = TransitionFrame {
        overlay_opacity: 0.0,
        content_scale: 1.0,
        content_opacity: 1.0,
    };

    fn covered(self) -> Self {
        Self {
            overlay_opacity: 1.0,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpTimings {
    pub enter_ms: f64,
    pub dip_ms: f64,
    pub exit_ms: f64,
    pub restore_delay_ms: f64,
    pub restore_ms: f64,
    pub dip_scale: f64,
    pub dip_opacity: f64,
}

impl Default for WarpTimings {
    fn default() -> Self {
        Self {
            enter_ms: 320.0,
            dip_ms: 280.0,
            exit_ms: 450.0,
            restore_delay_ms: 50.0,
            restore_ms: 400.0,
            dip_scale: 0.96,
            dip_opacity: 0.4,
        }
    }
}

impl WarpTimings {
    fn exit_total(&self) -> f64 {
        self.exit_ms.max(self.restore_delay_ms + self.restore_ms)
    }
}

/// Returned by [`TransitionSequencer::run`].
#[derive(Clone, Debug)]
pub struct SequenceHandle {
    id: u64,
    settled: Rc<Cell<u64>>,
}

impl SequenceHandle {
    pub fn is_settled(&self) -> bool {
        self.settled.get() >= self.id
    }
}

/// Anything that can hide a content swap behind a visual handoff.
pub trait Transition {
    fn transition(&self, swap: Box<dyn FnOnce()>);
}

type SwapCallback = Box<dyn FnOnce()>;

struct SequenceState {
    id: u64,
    phase: Phase,
    started_at: Option<f64>,
    from: TransitionFrame,
    frame: TransitionFrame,
    callback: Option<SwapCallback>,
}

/// Runs the warp transition: overlay in, swap, overlay out.
///
/// Only one sequence is in flight at a time. A `run` while another sequence
/// is still animating supersedes it: the overlay jumps to full opacity, the
/// superseded callback is flushed if it had not run yet, the new callback
/// runs, and the exiting phase starts over. Every callback runs exactly once
/// and always behind a fully opaque overlay.
///
/// The sequencer does not own a clock. Whoever drives it calls [`tick`]
/// once per animation frame while [`is_idle`] is false.
///
/// [`tick`]: TransitionSequencer::tick
/// [`is_idle`]: TransitionSequencer::is_idle
pub struct TransitionSequencer {
    motion: Motion,
    timings: WarpTimings,
    warp: Rc<WarpContext>,
    state: RefCell<SequenceState>,
    next_id: Cell<u64>,
    settled: Rc<Cell<u64>>,
    waker: RefCell<Option<Rc<dyn Fn()>>>,
}

impl TransitionSequencer {
    pub fn new(motion: Motion, warp: Rc<WarpContext>) -> Self {
        Self::with_timings(motion, warp, WarpTimings::default())
    }

    pub fn with_timings(motion: Motion, warp: Rc<WarpContext>, timings: WarpTimings) -> Self {
        Self {
            motion,
            timings,
            warp,
            state: RefCell::new(SequenceState {
                id: 0,
                phase: Phase::Idle,
                started_at: None,
                from: TransitionFrame::REST,
                frame: TransitionFrame::REST,
                callback: None,
            }),
            next_id: Cell::new(0),
            settled: Rc::new(Cell::new(0)),
            waker: RefCell::new(None),
        }
    }

    /// Registers the hook that starts frame delivery when a sequence begins.
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.waker.borrow_mut() = Some(Rc::new(waker));
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == Phase::Idle
    }

    pub fn frame(&self) -> TransitionFrame {
        self.state.borrow().frame
    }

    pub fn run(&self, callback: impl FnOnce() + 'static) -> SequenceHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = SequenceHandle {
            id,
            settled: Rc::clone(&self.settled),
        };

        if self.motion == Motion::Unavailable {
            callback();
            self.settle(id);
            return handle;
        }

        if self.is_idle() {
            {
                let mut state = self.state.borrow_mut();
                state.id = id;
                state.phase = Phase::Entering;
                state.started_at = None;
                state.from = state.frame;
                state.callback = Some(Box::new(callback));
            }
            self.warp.dive();
        } else {
            self.supersede(id, Box::new(callback));
        }
        self.wake();
        handle
    }

    /// Advances the in-flight sequence to `now` (milliseconds, monotonic).
    pub fn tick(&self, now: f64) -> TransitionFrame {
        let mut state = self.state.borrow_mut();
        let phase = state.phase;
        if matches!(phase, Phase::Idle | Phase::Midpoint) {
            return state.frame;
        }
        let started = *state.started_at.get_or_insert(now);
        let elapsed = (now - started).max(0.0);

        match phase {
            Phase::Entering if elapsed < self.timings.enter_ms => {
                state.frame = self.entering_frame(state.from, elapsed);
                state.frame
            }
            Phase::Entering => {
                state.frame = self.entering_frame(state.from, self.timings.enter_ms);
                state.phase = Phase::Midpoint;
                let callback = state.callback.take();
                drop(state);

                if let Some(callback) = callback {
                    callback();
                }
                self.warp.settle();

                let mut state = self.state.borrow_mut();
                // A run() issued from inside the callback has already started the exit.
                if state.phase == Phase::Midpoint {
                    state.phase = Phase::Exiting;
                    state.started_at = None;
                    state.from = state.frame;
                }
                state.frame
            }
            Phase::Exiting if elapsed < self.timings.exit_total() => {
                state.frame = self.exiting_frame(state.from, elapsed);
                state.frame
            }
            Phase::Exiting => {
                let id = state.id;
                state.phase = Phase::Idle;
                state.started_at = None;
                state.from = TransitionFrame::REST;
                state.frame = TransitionFrame::REST;
                drop(state);
                self.settle(id);
                TransitionFrame::REST
            }
            Phase::Idle | Phase::Midpoint => unreachable!("handled above"),
        }
    }

    fn supersede(&self, id: u64, callback: SwapCallback) {
        let (superseded, previous_id) = {
            let mut state = self.state.borrow_mut();
            state.frame = state.frame.covered();
            state.phase = Phase::Midpoint;
            let previous_id = state.id;
            state.id = id;
            (state.callback.take(), previous_id)
        };
        log::debug!("warp sequence {} superseded by {}", previous_id, id);

        if let Some(superseded) = superseded {
            superseded();
        }
        self.settle(previous_id);
        callback();
        self.warp.settle();

        let mut state = self.state.borrow_mut();
        state.phase = Phase::Exiting;
        state.started_at = None;
        state.from = state.frame;
    }

    fn settle(&self, id: u64) {
        if id > self.settled.get() {
            self.settled.set(id);
        }
    }

    fn wake(&self) {
        let waker = self.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }
    }

    fn entering_frame(&self, from: TransitionFrame, elapsed: f64) -> TransitionFrame {
        let t = &self.timings;
        let cover = power2_in(elapsed / t.enter_ms);
        let dip = power2_in(elapsed / t.dip_ms);
        TransitionFrame {
            overlay_opacity: lerp(from.overlay_opacity, 1.0, cover),
            content_scale: lerp(from.content_scale, t.dip_scale, dip),
            content_opacity: lerp(from.content_opacity, t.dip_opacity, dip),
        }
    }

    fn exiting_frame(&self, from: TransitionFrame, elapsed: f64) -> TransitionFrame {
        let t = &self.timings;
        let reveal = power2_out(elapsed / t.exit_ms);
        let restore = power2_out((elapsed - t.restore_delay_ms) / t.restore_ms);
        TransitionFrame {
            overlay_opacity: lerp(from.overlay_opacity, 0.0, reveal),
            content_scale: lerp(from.content_scale, 1.0, restore),
            content_opacity: lerp(from.content_opacity, 1.0, restore),
        }
    }
}

impl Transition for TransitionSequencer {
    fn transition(&self, swap: Box<dyn FnOnce()>) {
        self.run(swap);
    }
}
