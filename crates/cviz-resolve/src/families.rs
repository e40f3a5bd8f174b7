#![forbid(unsafe_code)]

//! Per-family resolution strategies.
//!
//! Each cipher family supplies only its coordinate-resolution rules; the
//! state machine and frame accumulation live elsewhere and are shared. Every
//! strategy honors the structured-data-first contract: a step that already
//! carries `current_pos` gets that position back verbatim, and text parsing
//! is never attempted here (the legacy fallback is a separate resolver the
//! dispatcher consults afterwards).

use cviz_core::{Cell, CharGrid, RuleKind, SpatialFact, Step};

use crate::ResolveStrategy;

/// Ordinal of an ASCII letter (A=0), `None` for anything else.
fn letter_ordinal(ch: char) -> Option<i32> {
    ch.is_ascii_alphabetic()
        .then(|| ch.to_ascii_uppercase() as i32 - 'A' as i32)
}

/// The deliberate pass-through fact: `(-1, -1)` cells, `Ignored` rule.
fn pass_through() -> SpatialFact {
    SpatialFact {
        input_cells: vec![Cell::NONE],
        output_cells: vec![Cell::NONE],
        rule: RuleKind::Ignored,
        rule_label: RuleKind::Ignored.to_string(),
    }
}

/// Classify two grid cells geometrically.
fn classify_pair(a: Cell, b: Cell) -> RuleKind {
    if a.row == b.row {
        RuleKind::Row
    } else if a.col == b.col {
        RuleKind::Column
    } else {
        RuleKind::Rectangle
    }
}

// ---------------------------------------------------------------------------
// Substitution (mono-alphabetic table lookup)
// ---------------------------------------------------------------------------

/// Table-lookup ciphers: one input character maps to one output character
/// through a static grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionResolver;

impl ResolveStrategy for SubstitutionResolver {
    fn resolve(&self, step: &Step, grid: Option<&CharGrid>) -> SpatialFact {
        if let Some(pos) = step.current_pos {
            let output_cells = lookup_cells(grid, step.output_char);
            return SpatialFact {
                input_cells: vec![pos],
                output_cells,
                rule: RuleKind::Unknown,
                rule_label: "substitution".into(),
            };
        }
        if step.subject_is_blank() {
            return pass_through();
        }
        let input_cells = lookup_cells(grid, step.current_char);
        let output_cells = lookup_cells(grid, step.output_char);
        if input_cells.is_empty() && output_cells.is_empty() {
            return SpatialFact::bare(RuleKind::Unknown);
        }
        SpatialFact {
            input_cells,
            output_cells,
            rule: RuleKind::Unknown,
            rule_label: "substitution".into(),
        }
    }
}

fn lookup_cells(grid: Option<&CharGrid>, ch: Option<char>) -> Vec<Cell> {
    match (grid, ch) {
        (Some(grid), Some(ch)) => grid.position_of(ch).into_iter().collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Digraph (pairwise grid swap)
// ---------------------------------------------------------------------------

/// Pairwise-substitution ciphers over a letter square: both characters of
/// the digram are located in the grid and the rule falls out of their
/// geometry (shared row, shared column, or rectangle).
#[derive(Debug, Clone, Copy, Default)]
pub struct DigraphResolver;

impl ResolveStrategy for DigraphResolver {
    fn resolve(&self, step: &Step, grid: Option<&CharGrid>) -> SpatialFact {
        if let Some(pos) = step.current_pos {
            return SpatialFact {
                input_cells: vec![pos],
                output_cells: Vec::new(),
                rule: RuleKind::Unknown,
                rule_label: "digraph".into(),
            };
        }
        if step.subject_is_blank() {
            return pass_through();
        }
        let Some(grid) = grid.filter(|g| !g.is_empty()) else {
            // No grid to locate against; the dispatcher may still try the
            // legacy description parser.
            return SpatialFact::bare(RuleKind::Unknown);
        };

        let input_cells = digram_cells(grid, &step.input_digram);
        if input_cells.len() < 2 {
            return SpatialFact::bare(RuleKind::Unknown);
        }
        let rule = classify_pair(input_cells[0], input_cells[1]);
        let output_cells = digram_cells(grid, &step.output_digram);
        SpatialFact {
            input_cells,
            output_cells,
            rule,
            rule_label: rule.to_string(),
        }
    }
}

fn digram_cells(grid: &CharGrid, digram: &str) -> Vec<Cell> {
    digram
        .chars()
        .filter_map(|ch| grid.position_of(ch))
        .collect()
}

// ---------------------------------------------------------------------------
// Keyword (repeating-key tableau)
// ---------------------------------------------------------------------------

/// Repeating-key ciphers: the active cell is the tableau intersection of the
/// key character's row and the plain character's column. Works against the
/// implicit 26x26 tableau even when the trace carries no matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResolver;

impl ResolveStrategy for KeywordResolver {
    fn resolve(&self, step: &Step, grid: Option<&CharGrid>) -> SpatialFact {
        if let Some(pos) = step.current_pos {
            return SpatialFact {
                input_cells: vec![pos],
                output_cells: Vec::new(),
                rule: RuleKind::Unknown,
                rule_label: "tableau".into(),
            };
        }
        let Some(plain) = step.current_char else {
            return pass_through();
        };
        let Some(col) = letter_ordinal(plain) else {
            // Non-alphabetic characters pass through unchanged.
            return pass_through();
        };
        let Some(row) = step.key_char.and_then(letter_ordinal) else {
            // An alphabetic character whose trace omitted the key char is
            // inconclusive, not a deliberate pass-through.
            return SpatialFact::bare(RuleKind::Unknown);
        };
        let cell = Cell::new(row, col);
        if let Some(grid) = grid.filter(|g| !g.is_empty())
            && grid.at(cell).is_none()
        {
            return SpatialFact::bare(RuleKind::Unknown);
        }
        SpatialFact {
            input_cells: vec![cell],
            output_cells: vec![cell],
            rule: RuleKind::Unknown,
            rule_label: "tableau".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Transposition (columnar write/read)
// ---------------------------------------------------------------------------

/// Columnar transposition: the engine records structured positions for both
/// the write pass and the read pass; the phase label distinguishes them.
/// Writing fills row-wise, reading drains column-wise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranspositionResolver;

impl ResolveStrategy for TranspositionResolver {
    fn resolve(&self, step: &Step, _grid: Option<&CharGrid>) -> SpatialFact {
        let Some(pos) = step.current_pos else {
            return SpatialFact::bare(RuleKind::Unknown);
        };
        let (rule, label) = if step.phase.starts_with("écriture")
            || step.phase.starts_with("ecriture")
            || step.phase.starts_with("write")
        {
            (RuleKind::Row, "write")
        } else if step.phase.starts_with("lecture") || step.phase.starts_with("read") {
            (RuleKind::Column, "read")
        } else {
            (RuleKind::Unknown, "transposition")
        };
        SpatialFact {
            input_cells: vec![pos],
            output_cells: Vec::new(),
            rule,
            rule_label: label.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Feistel (round pulse)
// ---------------------------------------------------------------------------

/// Round-based ciphers: nothing spatial to resolve — the round pulse is
/// driven entirely by the phase label and the intermediate results the
/// frame builder accumulates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeistelResolver;

impl ResolveStrategy for FeistelResolver {
    fn resolve(&self, step: &Step, _grid: Option<&CharGrid>) -> SpatialFact {
        let label = if step.phase.is_empty() {
            "round".to_string()
        } else {
            step.phase.clone()
        };
        SpatialFact::labeled(RuleKind::Unknown, label)
    }
}
