#![forbid(unsafe_code)]

//! Spatial facts: the resolved grid/rule information attached to a step.

use std::fmt;

use crate::grid::Cell;

/// Classification of the cipher rule applied at a step.
///
/// `ParseError` is deliberately distinct from `Unknown`: it means coordinate
/// resolution was attempted, expected to succeed, and failed — never a silent
/// fallback. `Ignored` marks characters that pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleKind {
    /// Both cells share a row; substitute along it.
    Row,
    /// Both cells share a column; substitute along it.
    Column,
    /// Cells form a rectangle; swap corners.
    Rectangle,
    /// The character passes through unchanged (space, punctuation).
    Ignored,
    /// No rule applies or none was recorded.
    #[default]
    Unknown,
    /// Coordinate resolution was attempted and failed.
    ParseError,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RuleKind::Row => "row",
            RuleKind::Column => "column",
            RuleKind::Rectangle => "rectangle",
            RuleKind::Ignored => "ignored",
            RuleKind::Unknown => "unknown",
            RuleKind::ParseError => "parse error",
        };
        f.write_str(label)
    }
}

/// Resolved spatial information for one step, however it was obtained.
///
/// Cell vectors are empty when nothing spatial applies (including the
/// `ParseError` case — the renderer flags the failure via `rule`, the
/// animation stays continuous).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpatialFact {
    /// Cells of the input character(s), highlight targets.
    pub input_cells: Vec<Cell>,
    /// Cells of the output character(s).
    pub output_cells: Vec<Cell>,
    /// Rule classification.
    pub rule: RuleKind,
    /// Display label for the rule (may carry algorithm-specific wording).
    pub rule_label: String,
}

impl SpatialFact {
    /// A fact with no spatial content and the given rule.
    #[must_use]
    pub fn bare(rule: RuleKind) -> Self {
        Self {
            rule,
            rule_label: rule.to_string(),
            ..Self::default()
        }
    }

    /// A fact with no spatial content, a rule, and an explicit label.
    #[must_use]
    pub fn labeled(rule: RuleKind, label: impl Into<String>) -> Self {
        Self {
            rule,
            rule_label: label.into(),
            ..Self::default()
        }
    }
}
