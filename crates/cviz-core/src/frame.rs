#![forbid(unsafe_code)]

//! Frames: immutable renderable snapshots.

use crate::spatial::SpatialFact;
use crate::step::Step;

/// Everything the renderer needs to draw the instant of one step.
///
/// Built once per renderable step and never mutated; the playback scheduler
/// hands out references together with phase interpolation progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// The normalized step this frame renders.
    pub step: Step,
    /// Resolved grid/rule information.
    pub spatial: SpatialFact,
    /// Prefix of the original plaintext consumed through this step.
    pub plain_prefix: String,
    /// All cipher output produced through this step.
    pub cipher_prefix: String,
    /// The key character active at this step (keyword ciphers). Empty
    /// otherwise.
    pub key_cursor: String,
}
