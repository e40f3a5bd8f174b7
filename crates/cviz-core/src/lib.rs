#![forbid(unsafe_code)]

//! Core: trace data model, step normalization, grid geometry, and easing.

pub mod easing;
pub mod frame;
pub mod grid;
pub mod spatial;
pub mod step;
pub mod trace;

pub use frame::Frame;
pub use grid::{Cell, CharGrid};
pub use spatial::{RuleKind, SpatialFact};
pub use step::{Step, normalize};
pub use trace::{RawStepEntry, RawTrace, TraceDecodeError};
