#![forbid(unsafe_code)]

//! Coordinate resolution: turning steps into [`SpatialFact`]s.
//!
//! One strategy per cipher family plus a legacy fallback that parses the
//! step's free-text description. The dispatcher tries the family strategy
//! first (structured data always wins); only when that comes back empty and
//! the caller explicitly enabled legacy parsing does the description
//! resolver run.
//!
//! Resolution is a pure function of the step text and the static grid:
//! resolving the same step twice yields structurally equal facts.

pub mod description;
pub mod families;
pub mod scan;

use cviz_core::{CharGrid, RuleKind, SpatialFact, Step};

use description::DescriptionResolver;
use families::{
    DigraphResolver, FeistelResolver, KeywordResolver, SubstitutionResolver,
    TranspositionResolver,
};

/// Algorithm family, selecting the resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// Mono-alphabetic table lookup.
    #[default]
    Substitution,
    /// Pairwise grid swap over a letter square.
    Digraph,
    /// Repeating-key tableau.
    Keyword,
    /// Columnar write/read transposition.
    Transposition,
    /// Round-based pulse with intermediate results.
    Feistel,
}

/// Resolver configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverConfig {
    /// Which family strategy to use.
    pub family: Family,
    /// Opt-in to the legacy description-text parser as a fallback for
    /// traces without structured positions.
    pub legacy_text_parsing: bool,
}

/// A coordinate-resolution strategy for one algorithm family.
pub trait ResolveStrategy {
    /// Resolve one step against the optional static grid.
    ///
    /// Must be total and deterministic; failures are expressed through
    /// [`RuleKind::ParseError`] / [`RuleKind::Ignored`], never panics.
    fn resolve(&self, step: &Step, grid: Option<&CharGrid>) -> SpatialFact;
}

/// Family dispatcher with optional legacy fallback.
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver for the given configuration.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn strategy(&self) -> &'static dyn ResolveStrategy {
        match self.config.family {
            Family::Substitution => &SubstitutionResolver,
            Family::Digraph => &DigraphResolver,
            Family::Keyword => &KeywordResolver,
            Family::Transposition => &TranspositionResolver,
            Family::Feistel => &FeistelResolver,
        }
    }

    /// Resolve one step.
    #[must_use]
    pub fn resolve(&self, step: &Step, grid: Option<&CharGrid>) -> SpatialFact {
        let fact = self.strategy().resolve(step, grid);
        if self.needs_fallback(&fact) && !step.description.is_empty() {
            return DescriptionResolver.resolve(step);
        }
        fact
    }

    /// Resolve every step, in order.
    #[must_use]
    pub fn resolve_all(&self, steps: &[Step], grid: Option<&CharGrid>) -> Vec<SpatialFact> {
        steps.iter().map(|s| self.resolve(s, grid)).collect()
    }

    /// A family strategy that came back with the bare inconclusive fact
    /// (no cells, no rule, no specific label) leaves room for the legacy
    /// parser, when enabled. Anything labeled by the strategy stands.
    fn needs_fallback(&self, fact: &SpatialFact) -> bool {
        self.config.legacy_text_parsing && *fact == SpatialFact::bare(RuleKind::Unknown)
    }
}
