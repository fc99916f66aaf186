use super::{BracketRegistry, Bye, Match, MatchKey, MatchRole};
use crate::seed::SeedPlan;

/// A fully planned bracket, ready to be painted.
#[derive(Debug, Clone)]
pub struct BracketTree {
    plan: SeedPlan,
    registry: BracketRegistry,
    byes: Vec<Bye>,
    final_match: Option<MatchKey>,
    third_place: Option<MatchKey>,
}

impl BracketTree {
    pub(crate) fn new(
        plan: SeedPlan,
        registry: BracketRegistry,
        byes: Vec<Bye>,
        final_match: Option<MatchKey>,
        third_place: Option<MatchKey>,
    ) -> Self {
        Self {
            plan,
            registry,
            byes,
            final_match,
            third_place,
        }
    }

    pub fn plan(&self) -> &SeedPlan {
        &self.plan
    }

    pub fn registry(&self) -> &BracketRegistry {
        &self.registry
    }

    pub fn byes(&self) -> &[Bye] {
        &self.byes
    }

    /// The championship match. `None` for qualification draws.
    pub fn final_match(&self) -> Option<&Match> {
        self.final_match.and_then(|key| self.registry.by_key(key))
    }

    /// The match for third place. `None` for qualification draws.
    pub fn third_place(&self) -> Option<&Match> {
        self.third_place.and_then(|key| self.registry.by_key(key))
    }

    /// Matches whose winners qualify out of the draw.
    pub fn qualifiers(&self) -> Vec<&Match> {
        self.registry
            .iter()
            .filter(|m| m.role() == MatchRole::Qualifier)
            .collect()
    }

    /// Matches in creation order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.registry.iter()
    }

    pub fn match_count(&self) -> usize {
        self.registry.len()
    }
}
