#![forbid(unsafe_code)]

//! Public facade for the cviz cipher simulation playback engine.
//!
//! The engine consumes an opaque, already-computed execution trace from an
//! external algorithm engine, normalizes it into frames, and drives a
//! deterministic, restartable, looping playback state machine. A render
//! adapter reads the per-tick output (frame, phase, eased progress) and does
//! all the drawing; nothing here touches I/O, files, or the network.
//!
//! ```no_run
//! use std::time::Duration;
//! use cviz::{Engine, EngineConfig, Family};
//!
//! let doc = r#"{"steps": [], "input_text": "HELLO"}"#;
//! let mut engine = Engine::from_json(doc, EngineConfig::for_family(Family::Digraph)).unwrap();
//! engine.tick(Duration::from_millis(16));
//! if let Some(out) = engine.output() {
//!     // hand (out.frame, out.phase, out.progress) to the render adapter
//!     let _ = out.progress;
//! }
//! ```

use std::time::Duration;

use tracing::info;

// --- Core re-exports -------------------------------------------------------

pub use cviz_core::easing;
pub use cviz_core::{
    Cell, CharGrid, Frame, RawStepEntry, RawTrace, RuleKind, SpatialFact, Step, TraceDecodeError,
    normalize,
};

// --- Resolver re-exports ---------------------------------------------------

pub use cviz_resolve::{Family, ResolveStrategy, Resolver, ResolverConfig};

// --- Frame-building re-exports ---------------------------------------------

pub use cviz_frame::{TraceContext, build_frames};

// --- Playback re-exports ---------------------------------------------------

pub use cviz_playback::{Phase, PhaseDurations, PlaybackEvent, Scheduler, TickOutput};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{
        Cell, Engine, EngineConfig, Family, Frame, Phase, PhaseDurations, PlaybackEvent, RawTrace,
        RuleKind, Scheduler, SpatialFact, TickOutput,
    };
}

// --- Engine configuration --------------------------------------------------

/// Full engine configuration: family strategy, phase timing, resolver
/// options.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// The algorithm family being visualized.
    pub family: Family,
    /// Per-phase animation durations.
    pub durations: PhaseDurations,
    /// Opt-in to legacy description-text parsing.
    pub legacy_text_parsing: bool,
}

impl EngineConfig {
    /// Default configuration for a family, with legacy parsing enabled —
    /// most recorded traces predate structured positions.
    #[must_use]
    pub fn for_family(family: Family) -> Self {
        Self {
            family,
            durations: PhaseDurations::default(),
            legacy_text_parsing: true,
        }
    }
}

// --- Engine ----------------------------------------------------------------

/// The simulation playback engine: normalize → resolve → build → schedule.
///
/// The whole pipeline runs synchronously at construction and again on every
/// trace replacement; a trace maps to playback state in one atomic pure
/// transformation, so the render adapter can never observe a torn mix of
/// old index and new frames.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    grid: CharGrid,
    scheduler: Scheduler,
}

impl Engine {
    /// Build an engine from an already-decoded trace.
    #[must_use]
    pub fn new(trace: RawTrace, config: EngineConfig) -> Self {
        let (grid, frames) = compile(&trace, &config);
        info!(
            family = ?config.family,
            steps = trace.steps.len(),
            frames = frames.len(),
            "engine initialized"
        );
        Self {
            config,
            grid,
            scheduler: Scheduler::new(frames, config.durations),
        }
    }

    /// Decode a JSON trace document and build an engine from it.
    pub fn from_json(doc: &str, config: EngineConfig) -> Result<Self, TraceDecodeError> {
        Ok(Self::new(RawTrace::from_json(doc)?, config))
    }

    /// Replace the current trace wholesale.
    ///
    /// The replacement is atomic: frames are rebuilt from scratch and the
    /// scheduler restarts at frame 0 before the next tick runs.
    pub fn replace_trace(&mut self, trace: RawTrace) {
        let (grid, frames) = compile(&trace, &self.config);
        self.grid = grid;
        self.scheduler.replace(frames);
    }

    /// Advance playback by an elapsed-time delta.
    pub fn tick(&mut self, dt: Duration) {
        self.scheduler.tick(dt);
    }

    /// Current render output: `(frame, phase, progress)`, or `None` while
    /// idle.
    #[must_use]
    pub fn output(&self) -> Option<TickOutput<'_>> {
        self.scheduler.output()
    }

    /// Drain queued phase-transition events.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.scheduler.drain_events()
    }

    /// Whether there is nothing to play.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// The built frame sequence.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        self.scheduler.frames()
    }

    /// The static lookup grid, surfaced for the renderer as a one-time
    /// artifact (setup steps never become animated frames).
    #[must_use]
    pub fn grid(&self) -> &CharGrid {
        &self.grid
    }
}

/// The pure trace-to-frames pipeline shared by construction and
/// replacement.
fn compile(trace: &RawTrace, config: &EngineConfig) -> (CharGrid, Vec<Frame>) {
    let grid = trace
        .matrix
        .as_deref()
        .map(CharGrid::from_rows)
        .unwrap_or_default();
    let steps = normalize(Some(trace));
    let resolver = Resolver::new(ResolverConfig {
        family: config.family,
        legacy_text_parsing: config.legacy_text_parsing,
    });
    let grid_ref = (!grid.is_empty()).then_some(&grid);
    let facts = resolver.resolve_all(&steps, grid_ref);
    let ctx = TraceContext::from_trace(trace);
    let frames = build_frames(&steps, &facts, &ctx);
    (grid, frames)
}
