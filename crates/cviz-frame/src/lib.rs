#![forbid(unsafe_code)]

//! Frame building: combining steps and spatial facts into renderable
//! snapshots with accumulated text state.
//!
//! # Invariants
//!
//! 1. Only `renderable` steps yield frames; the output length equals the
//!    number of renderable steps.
//! 2. `plain_prefix` and `cipher_prefix` lengths are non-decreasing across
//!    consecutive frames.
//! 3. The key cursor advances once per renderable step (wrapping modulo key
//!    length), regardless of how many raw steps were skipped in between.
//! 4. Pure and idempotent: building twice from the same inputs yields
//!    identical vectors.
//!
//! # Failure Modes
//!
//! - `steps` and `facts` of different lengths: the shorter length wins;
//!   surplus entries are ignored (defaulted facts would hide resolver bugs).
//! - Plaintext shorter than the consumed character count: the prefix stops
//!   growing at the plaintext's end.
//! - No plaintext recorded: the prefix is rebuilt from the steps' own
//!   subjects instead.

use cviz_core::{Frame, RawTrace, SpatialFact, Step};

/// Static per-trace context the builder accumulates against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceContext {
    /// The original plaintext, when the trace recorded it.
    pub plaintext: String,
    /// Repeating key material for keyword ciphers. Empty otherwise.
    pub keyword: String,
}

impl TraceContext {
    /// Recover the builder context from a trace's auxiliary fields.
    #[must_use]
    pub fn from_trace(trace: &RawTrace) -> Self {
        Self {
            plaintext: trace.input_text.clone().unwrap_or_default(),
            keyword: trace.keyword.clone().unwrap_or_default(),
        }
    }
}

/// Number of source characters a step consumes: a digram consumes its two
/// characters, everything else one.
fn consumed_chars(step: &Step) -> usize {
    let digram_len = step.input_digram.chars().count();
    if digram_len > 0 { digram_len } else { 1 }
}

/// The cipher output a step contributes, in priority order.
fn produced_output(step: &Step) -> String {
    if let Some(ch) = step.output_char {
        return ch.to_string();
    }
    if !step.output_digram.is_empty() {
        return step.output_digram.clone();
    }
    step.intermediate.clone()
}

/// Build the frame sequence for a trace.
///
/// `facts` must be parallel to `steps` (one fact per step, renderable or
/// not), as produced by a resolver's `resolve_all`.
#[must_use]
pub fn build_frames(steps: &[Step], facts: &[SpatialFact], ctx: &TraceContext) -> Vec<Frame> {
    let plain_chars: Vec<char> = ctx.plaintext.chars().collect();
    let key_chars: Vec<char> = ctx.keyword.chars().collect();

    let mut frames = Vec::new();
    let mut consumed = 0usize;
    let mut cipher = String::new();
    let mut fallback_plain = String::new();
    let mut renderable_ordinal = 0usize;

    for (step, fact) in steps.iter().zip(facts) {
        if !step.renderable {
            continue;
        }
        consumed += consumed_chars(step);
        cipher.push_str(&produced_output(step));
        fallback_plain.push_str(&step.subject());

        let plain_prefix = if plain_chars.is_empty() {
            fallback_plain.clone()
        } else {
            plain_chars.iter().take(consumed).collect()
        };

        let key_cursor = if key_chars.is_empty() {
            step.key_char.map(String::from).unwrap_or_default()
        } else {
            key_chars[renderable_ordinal % key_chars.len()].to_string()
        };

        frames.push(Frame {
            step: step.clone(),
            spatial: fact.clone(),
            plain_prefix,
            cipher_prefix: cipher.clone(),
            key_cursor,
        });
        renderable_ordinal += 1;
    }
    frames
}
