#![forbid(unsafe_code)]

//! Trace normalization: raw entries to ordered, typed [`Step`]s.
//!
//! # Invariants
//!
//! 1. Total: never errors, never drops an entry. Malformed entries keep
//!    defaulted fields so the good steps around them still animate.
//! 2. 1:1 and order-preserving — order is the only sequencing signal the
//!    trace carries (there are no timestamps).
//! 3. `renderable` is true iff the step carries a char pair, a digram pair,
//!    or a structured position inside an active (non-setup) phase.

use crate::grid::Cell;
use crate::trace::{RawStepEntry, RawTrace};

/// Phase labels that mark one-time setup work rather than an animated
/// operation. Matched case-insensitively as prefixes; the vocabulary is
/// bilingual because recorded traces are.
const SETUP_PHASES: &[&str] = &[
    "matrix generation",
    "key setup",
    "initialization",
    "génération",
    "initialisation",
];

/// One normalized unit of the trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Position in the original trace, monotonically increasing.
    pub index: usize,
    /// Whether this step produces an animated transition.
    pub renderable: bool,
    /// Human-readable description carried through from the raw entry.
    pub description: String,
    /// Input character, if the step processes a single character.
    pub current_char: Option<char>,
    /// Output character produced.
    pub output_char: Option<char>,
    /// Key character consumed (keyword ciphers).
    pub key_char: Option<char>,
    /// Two-character input unit (digraph ciphers). Empty when absent.
    pub input_digram: String,
    /// Two-character output unit. Empty when absent.
    pub output_digram: String,
    /// Intermediate result text (round-based ciphers). Empty when absent.
    pub intermediate: String,
    /// Phase label, lowercased. Empty when absent.
    pub phase: String,
    /// Structured grid position, when the engine supplied one.
    pub current_pos: Option<Cell>,
}

impl Step {
    /// The step's moving subject: digram if present, else the current char.
    ///
    /// Used to distinguish a deliberate pass-through (blank subject) from a
    /// genuine parse failure.
    #[must_use]
    pub fn subject(&self) -> String {
        if !self.input_digram.is_empty() {
            self.input_digram.clone()
        } else {
            self.current_char.map(String::from).unwrap_or_default()
        }
    }

    /// Whether the moving subject is empty or all whitespace.
    #[must_use]
    pub fn subject_is_blank(&self) -> bool {
        self.subject().trim().is_empty()
    }
}

/// Whether a lowercased phase label names an active operation.
///
/// Setup phases are surfaced as static artifacts, not animated frames.
/// Unrecognized labels count as active — we favor animating over dropping.
fn phase_is_active(phase: &str) -> bool {
    !phase.is_empty() && !SETUP_PHASES.iter().any(|p| phase.starts_with(p))
}

fn first_char(field: &Option<String>) -> Option<char> {
    field.as_deref().and_then(|s| s.chars().next())
}

fn normalize_entry(index: usize, raw: &RawStepEntry) -> Step {
    let current_char = first_char(&raw.current_char);
    let output_char = first_char(&raw.output_char);
    let input_digram = raw.input_digram.clone().unwrap_or_default();
    let output_digram = raw.output_digram.clone().unwrap_or_default();
    let phase = raw
        .phase
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let current_pos = raw.current_pos.map(Cell::from);

    let char_pair = current_char.is_some() && output_char.is_some();
    let digram_pair = !input_digram.is_empty() && !output_digram.is_empty();
    let positioned = current_pos.is_some() && phase_is_active(&phase);
    let renderable = char_pair || digram_pair || positioned;

    Step {
        index,
        renderable,
        description: raw.description.clone(),
        current_char,
        output_char,
        key_char: first_char(&raw.key_char_used),
        input_digram,
        output_digram,
        intermediate: raw.intermediate_result.clone().unwrap_or_default(),
        phase,
        current_pos,
    }
}

/// Normalize a raw trace into an ordered step list.
///
/// `None` or a trace without entries yields an empty list; the playback
/// layer turns that into the idle state.
#[must_use]
pub fn normalize(trace: Option<&RawTrace>) -> Vec<Step> {
    let Some(trace) = trace else {
        return Vec::new();
    };
    trace
        .steps
        .iter()
        .enumerate()
        .map(|(i, raw)| normalize_entry(i, raw))
        .collect()
}
