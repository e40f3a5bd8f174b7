#![forbid(unsafe_code)]

//! Raw trace input: the opaque artifact handed over by the algorithm engine.
//!
//! A trace is a JSON-shaped document with a `steps` array and a handful of
//! algorithm-specific optional top-level fields. Any subset of fields may be
//! absent; decoding is tolerant by construction (`#[serde(default)]` on every
//! field, unknown fields ignored). A trace is immutable once decoded and is
//! replaced wholesale when a new simulation runs — never mutated in place.
//!
//! # Failure Modes
//!
//! - Document is not JSON at all: [`TraceDecodeError::Json`], returned to the
//!   caller. This is the only error path; a structurally valid but sparsely
//!   populated trace always decodes.
//! - Missing `steps`: decodes to an empty step list (downstream this yields
//!   the idle playback state, not an error).

use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Raw step entries
// ---------------------------------------------------------------------------

/// One loosely-typed entry of the raw trace.
///
/// Presence of the optional fields varies by algorithm family: a substitution
/// trace carries `current_char`/`output_char`, a digraph trace carries
/// `input_digram`/`output_digram`, a transposition trace carries
/// `current_pos` plus a `phase` label, and so on. Only `description` is
/// always present (and even that defaults to empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawStepEntry {
    /// Human-readable description of the recorded action.
    pub description: String,
    /// The input character being processed, if any.
    pub current_char: Option<String>,
    /// The produced output character, if any.
    pub output_char: Option<String>,
    /// The key character consumed by this step (keyword ciphers).
    pub key_char_used: Option<String>,
    /// Two-character input unit (pairwise-substitution ciphers).
    pub input_digram: Option<String>,
    /// Two-character output unit (pairwise-substitution ciphers).
    pub output_digram: Option<String>,
    /// Intermediate result text (round-based ciphers).
    pub intermediate_result: Option<String>,
    /// Free-text phase label, e.g. "Encryption", "Matrix Generation",
    /// "Écriture", "Lecture".
    pub phase: Option<String>,
    /// Structured grid position as `[row, col]`, when the engine supplies it.
    pub current_pos: Option<[i32; 2]>,
    /// Snapshot of the working matrix at this step, if recorded.
    pub matrix: Option<Vec<Vec<String>>>,
}

// ---------------------------------------------------------------------------
// Raw trace
// ---------------------------------------------------------------------------

/// The full, already-computed record of an algorithm's execution.
///
/// Owned by the caller; the engine only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawTrace {
    /// Ordered step entries. Order is the only sequencing signal.
    pub steps: Vec<RawStepEntry>,
    /// The original plaintext, when the engine recorded it.
    pub input_text: Option<String>,
    /// The final cipher output as text.
    pub final_result: Option<String>,
    /// The final cipher output as hex (round-based ciphers).
    pub final_result_hex: Option<String>,
    /// Generated lookup matrix (grid ciphers), as rows of single-char cells.
    pub matrix: Option<Vec<Vec<String>>>,
    /// Repeating key material (keyword ciphers).
    pub keyword: Option<String>,
}

impl RawTrace {
    /// Decode a trace from a JSON document.
    ///
    /// Tolerant of any subset of fields being absent; fails only when the
    /// document is not valid JSON or `steps` has the wrong shape.
    pub fn from_json(doc: &str) -> Result<Self, TraceDecodeError> {
        serde_json::from_str(doc).map_err(TraceDecodeError::Json)
    }

    /// Whether this trace carries no step entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error decoding a raw trace document.
#[derive(Debug)]
pub enum TraceDecodeError {
    /// The document was not valid JSON of the expected shape.
    Json(serde_json::Error),
}

impl fmt::Display for TraceDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceDecodeError::Json(e) => write!(f, "trace is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for TraceDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceDecodeError::Json(e) => Some(e),
        }
    }
}
