#![forbid(unsafe_code)]

//! Legacy description-text resolver.
//!
//! Recovers cell coordinates by pattern-matching free-text step
//! descriptions. This path exists only for traces whose engine does not
//! supply structured positions; it is isolated here so it can be deleted
//! without touching the scheduler or frame builder, and it is only
//! constructed when [`ResolverConfig::legacy_text_parsing`] is set.
//!
//! # Recognized patterns
//!
//! - *pair membership*: two quoted single characters each followed by a
//!   parenthesized `(row, col)` pair — `'H' is at (1, 2)`. Only pairs
//!   anchored to a quoted subject count; a bare `(r, c)` floating in prose
//!   does not. Membership pairs are read from the text left of any arrow.
//! - *transformed-to*: quoted char, arrow marker, quoted char, second pair —
//!   `-> 'B' (1, 0)`. Anchored pairs right of the arrow are outputs; they
//!   never satisfy the two-membership-pair requirement.
//! - *rule keywords*: a fixed bilingual vocabulary mapping to [`RuleKind`].
//!   A keyword always wins rule classification, whether or not coordinates
//!   also parsed.
//!
//! # Failure Modes
//!
//! - Fewer than two membership pairs, blank subject: `Ignored` (the
//!   deliberate pass-through case, e.g. a space in a digraph cipher).
//! - Fewer than two membership pairs, non-blank subject, no keyword, but
//!   coordinate-shaped text present: `ParseError` with empty cell vectors.
//!   Logged once via `warn!`; playback continues — the error is data, not
//!   control flow.
//! - No coordinate-shaped text anywhere (an ordinary prose description):
//!   `Unknown`. Parsing was never expected to succeed, so it did not fail.
//!
//! [`ResolverConfig::legacy_text_parsing`]: crate::ResolverConfig

use cviz_core::{RuleKind, SpatialFact, Step};
use tracing::warn;

use crate::scan::{anchored_pairs, cell_pairs, split_at_arrow};

/// Rule keyword vocabulary, lowercased. English and French variants are both
/// live in recorded traces.
const ROW_KEYWORDS: &[&str] = &["same row", "même ligne", "meme ligne"];
const COLUMN_KEYWORDS: &[&str] = &["same column", "même colonne", "meme colonne"];
const RECTANGLE_KEYWORDS: &[&str] = &["rectangle"];

/// Detect a rule keyword anywhere in the description.
#[must_use]
pub fn rule_keyword(text: &str) -> Option<RuleKind> {
    let lower = text.to_lowercase();
    if ROW_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(RuleKind::Row);
    }
    if COLUMN_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(RuleKind::Column);
    }
    if RECTANGLE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(RuleKind::Rectangle);
    }
    None
}

/// The fallback resolver over description text. Stateless; resolving the
/// same step twice yields structurally equal facts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionResolver;

impl DescriptionResolver {
    /// Resolve a step from its description text alone.
    ///
    /// Total: returns a fact for every input, including degenerate ones.
    #[must_use]
    pub fn resolve(&self, step: &Step) -> SpatialFact {
        let text = &step.description;
        let keyword = rule_keyword(text);

        // Anchored pairs left of an arrow are the digram's membership
        // positions; anchored pairs right of it are transformed outputs.
        let (input_cells, output_cells) = match split_at_arrow(text) {
            Some((lhs, rhs)) => (anchored_pairs(lhs), anchored_pairs(rhs)),
            None => (anchored_pairs(text), Vec::new()),
        };

        // Rule classification needs both membership positions; outputs
        // alone cannot stand in for them.
        if input_cells.len() >= 2 {
            let rule = keyword.unwrap_or(RuleKind::Unknown);
            return SpatialFact {
                input_cells,
                output_cells,
                rule,
                rule_label: rule.to_string(),
            };
        }

        // A keyword classifies the rule even when coordinates did not parse.
        if let Some(rule) = keyword {
            return SpatialFact::bare(rule);
        }

        if step.subject_is_blank() {
            return SpatialFact::bare(RuleKind::Ignored);
        }

        // Parsing only counts as failed when the text visibly carries
        // coordinates; an ordinary prose description is merely inconclusive.
        if cell_pairs(text).is_empty() {
            return SpatialFact::bare(RuleKind::Unknown);
        }

        warn!(
            step = step.index,
            description = %text,
            membership_pairs = input_cells.len(),
            "description parse failed, expected two membership pairs"
        );
        SpatialFact::bare(RuleKind::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cviz_core::Cell;

    fn step_with(description: &str, digram: &str) -> Step {
        Step {
            description: description.into(),
            input_digram: digram.into(),
            ..Step::default()
        }
    }

    #[test]
    fn pair_membership_resolves_both_inputs() {
        let step = step_with("'H' is at (1, 2) and 'E' is at (3, 4)", "HE");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.input_cells, vec![Cell::new(1, 2), Cell::new(3, 4)]);
        assert!(fact.output_cells.is_empty());
        assert_eq!(fact.rule, RuleKind::Unknown);
    }

    #[test]
    fn transformed_to_splits_inputs_and_outputs() {
        let step = step_with("'H' (1, 2) and 'E' (3, 0) -> 'B' (1, 0)", "HE");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.input_cells, vec![Cell::new(1, 2), Cell::new(3, 0)]);
        assert_eq!(fact.output_cells, vec![Cell::new(1, 0)]);
    }

    #[test]
    fn single_pair_with_subject_is_parse_error() {
        let step = step_with("'A' is at (0,0) then something illegible", "AB");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::ParseError);
        assert!(fact.input_cells.is_empty());
        assert!(fact.output_cells.is_empty());
    }

    #[test]
    fn output_pair_does_not_satisfy_membership() {
        // One membership pair before the arrow, one output pair after it:
        // still short of the two membership positions rule needs.
        let step = step_with("'A' is at (0,0) ... -> 'Q' (0,1)", "AQ");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::ParseError);
        assert!(fact.input_cells.is_empty());
    }

    #[test]
    fn unanchored_pairs_do_not_satisfy_membership() {
        let step = step_with("positions (1, 2) and (3, 4) with no subjects", "AB");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::ParseError);
    }

    #[test]
    fn coordinate_free_description_is_inconclusive() {
        let step = step_with("Substituting 'A' with 'Q'", "AQ");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::Unknown);
        assert!(fact.input_cells.is_empty());
    }

    #[test]
    fn single_pair_with_blank_subject_is_ignored() {
        let step = step_with("'A' is at (0,0)", "  ");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::Ignored);
    }

    #[test]
    fn keyword_wins_regardless_of_coordinates() {
        let step = step_with("Même ligne: décalage vers la droite", "HE");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::Row);

        let step = step_with("Same column shift for 'A' (0, 0) and 'B' (1, 0)", "AB");
        let fact = DescriptionResolver.resolve(&step);
        assert_eq!(fact.rule, RuleKind::Column);
        assert_eq!(fact.input_cells.len(), 2);
    }

    #[test]
    fn resolving_twice_is_deterministic() {
        let step = step_with("rectangle: 'H' (1, 2) -> 'B' (1, 0), 'E' (3, 0) -> 'D' (3, 2)", "HE");
        let a = DescriptionResolver.resolve(&step);
        let b = DescriptionResolver.resolve(&step);
        assert_eq!(a, b);
        assert_eq!(a.rule, RuleKind::Rectangle);
    }
}
