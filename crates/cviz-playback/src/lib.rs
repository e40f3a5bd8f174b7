#![forbid(unsafe_code)]

//! Playback scheduler: a deterministic, timer-driven phase state machine.
//!
//! One scheduler per active trace. Each renderable frame is animated through
//! three phases (enter, transform, exit); after the last frame's exit the
//! scheduler pauses briefly and loops back to frame 0, forever. The only
//! "stop" signals are trace replacement and teardown.
//!
//! Time arrives as elapsed-time deltas (frame-rate independent), accumulated
//! as [`Duration`] for precise accounting. A delta larger than the remaining
//! phase time collapses through intermediate phases within the same tick —
//! the leftover time is forwarded across each boundary — but every boundary
//! still queues exactly one [`PlaybackEvent`], drained by the caller.
//!
//! # Invariants
//!
//! 1. `current_index` is always in `[0, frames.len())` while frames exist.
//! 2. Empty frames: the scheduler is `Idle`, ticks are no-ops, no events.
//! 3. Each phase boundary emits exactly one event per crossing — no double
//!    fires, no skipped phases under large deltas.
//! 4. [`Scheduler::replace`] rebuilds the whole playback state as one
//!    object; no frame of the old trace is observable afterwards.
//! 5. A `ParseError` frame plays all phases like any other frame; the
//!    failure lives in the frame data, not in control flow.

use std::time::Duration;

use cviz_core::Frame;
use cviz_core::easing::{ease_in, ease_out, linear};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Phases and configuration
// ---------------------------------------------------------------------------

/// Sub-stage of animating a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No frames loaded; nothing to play.
    #[default]
    Idle,
    /// The frame's subject enters the scene.
    Entering,
    /// The subject is held/pulsed at the processing focal point.
    Transforming,
    /// The result departs toward its output slot.
    Exiting,
    /// Fixed pause between the last frame's exit and the loop restart.
    LoopPause,
}

/// Per-phase durations.
///
/// Zero durations are clamped to one nanosecond at construction so phase
/// arithmetic never divides by zero and ticks always make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    /// Length of [`Phase::Entering`].
    pub enter: Duration,
    /// Length of [`Phase::Transforming`] (the dwell).
    pub transform: Duration,
    /// Length of [`Phase::Exiting`].
    pub exit: Duration,
    /// Length of [`Phase::LoopPause`].
    pub loop_pause: Duration,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(400),
            transform: Duration::from_millis(600),
            exit: Duration::from_millis(400),
            loop_pause: Duration::from_millis(1200),
        }
    }
}

impl PhaseDurations {
    const MIN: Duration = Duration::from_nanos(1);

    fn clamped(self) -> Self {
        Self {
            enter: self.enter.max(Self::MIN),
            transform: self.transform.max(Self::MIN),
            exit: self.exit.max(Self::MIN),
            loop_pause: self.loop_pause.max(Self::MIN),
        }
    }

    fn of(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Entering => self.enter,
            Phase::Transforming => self.transform,
            Phase::Exiting => self.exit,
            Phase::LoopPause => self.loop_pause,
            Phase::Idle => Duration::MAX,
        }
    }
}

// ---------------------------------------------------------------------------
// Events and output
// ---------------------------------------------------------------------------

/// An event queued by the scheduler during [`Scheduler::tick`] and drained
/// by the caller. Collected into a queue rather than delivered via closures
/// so the tick stays pure and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A phase boundary was crossed: `frame` entered `phase`.
    PhaseStarted {
        /// Index of the frame the phase applies to.
        frame: usize,
        /// The phase just started.
        phase: Phase,
    },
    /// Playback wrapped from the last frame back to frame 0.
    Looped,
    /// A new trace replaced the playback state.
    TraceReplaced,
}

/// What the render adapter reads each tick: the current frame, the phase,
/// and the eased phase progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput<'a> {
    /// The frame being animated.
    pub frame: &'a Frame,
    /// Current phase.
    pub phase: Phase,
    /// Eased interpolation progress within the phase, in `[0, 1]`.
    pub progress: f32,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// The per-trace playback state machine.
///
/// Owns the frame list exclusively; there is exactly one scheduler per
/// visualization panel and no sharing across playbacks.
#[derive(Debug, Clone)]
pub struct Scheduler {
    frames: Vec<Frame>,
    durations: PhaseDurations,
    current: usize,
    phase: Phase,
    elapsed: Duration,
    events: Vec<PlaybackEvent>,
}

impl Scheduler {
    /// Create a scheduler over a built frame list.
    ///
    /// Empty frames yield a permanently idle scheduler.
    #[must_use]
    pub fn new(frames: Vec<Frame>, durations: PhaseDurations) -> Self {
        let phase = if frames.is_empty() {
            Phase::Idle
        } else {
            Phase::Entering
        };
        Self {
            frames,
            durations: durations.clamped(),
            current: 0,
            phase,
            elapsed: Duration::ZERO,
            events: Vec::new(),
        }
    }

    /// Atomically replace the playback state with a new trace's frames.
    ///
    /// Cancels any in-flight phase, discards the old frames wholesale, and
    /// restarts at the entering phase of frame 0 (or idle when empty). The
    /// old trace is not observable from any accessor afterwards.
    pub fn replace(&mut self, frames: Vec<Frame>) {
        info!(
            old_frames = self.frames.len(),
            new_frames = frames.len(),
            "trace replaced, playback restarts"
        );
        *self = Scheduler::new(frames, self.durations);
        self.events.push(PlaybackEvent::TraceReplaced);
        if self.phase != Phase::Idle {
            self.events.push(PlaybackEvent::PhaseStarted {
                frame: 0,
                phase: Phase::Entering,
            });
        }
    }

    /// Advance playback by an elapsed-time delta.
    ///
    /// No-op while idle. Large deltas collapse through as many phase
    /// boundaries as they cover, queuing one event per boundary.
    pub fn tick(&mut self, dt: Duration) {
        if self.phase == Phase::Idle {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        loop {
            let span = self.durations.of(self.phase);
            if self.elapsed < span {
                break;
            }
            // Forward the overshoot into the next phase.
            self.elapsed -= span;
            self.advance();
        }
    }

    /// Move to the next phase, queuing its boundary event.
    fn advance(&mut self) {
        let next = match self.phase {
            Phase::Entering => Phase::Transforming,
            Phase::Transforming => Phase::Exiting,
            Phase::Exiting => {
                if self.current + 1 < self.frames.len() {
                    self.current += 1;
                    Phase::Entering
                } else {
                    Phase::LoopPause
                }
            }
            Phase::LoopPause => {
                self.current = 0;
                self.events.push(PlaybackEvent::Looped);
                debug!(frames = self.frames.len(), "playback loop restarted");
                Phase::Entering
            }
            Phase::Idle => return,
        };
        self.phase = next;
        self.events.push(PlaybackEvent::PhaseStarted {
            frame: self.current,
            phase: next,
        });
    }

    /// Drain and return all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    /// The current render output, or `None` while idle.
    ///
    /// During the loop pause the last frame is reported at progress 1.0 so
    /// the adapter never sees a gap between loops.
    #[must_use]
    pub fn output(&self) -> Option<TickOutput<'_>> {
        match self.phase {
            Phase::Idle => None,
            Phase::LoopPause => self.frames.last().map(|frame| TickOutput {
                frame,
                phase: Phase::LoopPause,
                progress: 1.0,
            }),
            phase => self.frames.get(self.current).map(|frame| TickOutput {
                frame,
                phase,
                progress: self.progress(),
            }),
        }
    }

    /// Eased progress within the current phase, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let span = self.durations.of(self.phase);
        if span == Duration::MAX {
            return 0.0;
        }
        let raw = (self.elapsed.as_secs_f64() / span.as_secs_f64()) as f32;
        let raw = raw.clamp(0.0, 1.0);
        match self.phase {
            // Decelerate into the focal point, accelerate out of it.
            Phase::Entering => ease_out(raw),
            Phase::Exiting => ease_in(raw),
            _ => linear(raw),
        }
    }

    /// Whether the scheduler has no frames to play.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current frame index. Always within bounds while frames exist.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The built frame list.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}
