//! Builds the full match tree for a field of participants.
//!
//! # Overview
//!
//! - [`BracketVariant`] - The closed set of bracket shapes
//! - [`BracketBuilder`] - Plans seeds, places every match and returns a
//!   [`BracketTree`]
//!
//! Building is pure. All input validation happens before the first match is
//! recorded, and no canvas is involved; painting the returned tree is a
//! separate step.
//!
//! # Build order
//!
//! 1. The first column holds one pairing per slot pair of the power-of-two
//!    draw. Pairings that are byes record no match; their participant is
//!    carried to the next column as a bye feeder.
//! 2. Every later column pairs the feeders of the previous one, two at a time.
//! 3. Standard brackets stop when a single match (the final) is built and then
//!    hang the third-place match below the lower semifinal. Qualification
//!    brackets stop after the round that leaves the requested number of
//!    survivors.
//!
//! Match numbers follow creation order, except that the final takes the
//! highest number and the third-place match the one before it.

use log::{debug, trace};

use bracketry_core::grid::Slot;

use crate::{
    BracketError,
    layout::{Feeder, PositionPlanner},
    seed::{Pairing, SeedPlan},
    structure::{BracketRegistry, BracketTree, Bye, Match, MatchKey, MatchRole, Participant},
};

/// The shape of bracket to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BracketVariant {
    /// Play down to one champion, with a match for third place.
    #[default]
    Standard,
    /// Play until `qualified` participants remain.
    Qualification { qualified: u32 },
    /// A draw seeded from both ends at once. Not supported.
    BothSides,
}

impl BracketVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Qualification { .. } => "qualification",
            Self::BothSides => "both-sides",
        }
    }
}

/// Running state of one build.
#[derive(Debug)]
struct BuildContext {
    registry: BracketRegistry,
    column: u32,
    round: u32,
    next_index: u32,
    feeders: Vec<Feeder>,
    byes: Vec<Bye>,
}

impl BuildContext {
    fn new(first_round: u32) -> Self {
        Self {
            registry: BracketRegistry::new(),
            column: 1,
            round: first_round,
            next_index: 1,
            feeders: Vec::new(),
            byes: Vec::new(),
        }
    }

    fn take_index(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Moves to the next column and round, returning the feeders of the
    /// column just finished.
    fn advance_column(&mut self) -> Vec<Feeder> {
        self.column += 1;
        self.round += 1;
        std::mem::take(&mut self.feeders)
    }
}

/// Builds bracket trees with a fixed [`PositionPlanner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketBuilder {
    planner: PositionPlanner,
}

impl BracketBuilder {
    pub fn new(planner: PositionPlanner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &PositionPlanner {
        &self.planner
    }

    /// Builds the tree for `participants` starting at grid row `start_row`.
    ///
    /// # Errors
    ///
    /// - [`BracketError::UnsupportedVariant`] for [`BracketVariant::BothSides`]
    /// - [`BracketError::InvalidParticipantCount`] outside `3..=64`
    /// - [`BracketError::InvalidStartRow`] for row 0, or a row so low that
    ///   the bracket would run past the last grid row
    /// - [`BracketError::Config`] when the grid constants alone do not fit
    ///   the draw
    /// - [`BracketError::InvalidQualificationTarget`] when the qualification
    ///   target is not a power of two between 1 and half the field
    /// - [`BracketError::MissingChildMatch`] or
    ///   [`BracketError::MissingSemifinalMatch`] if the tree is internally
    ///   inconsistent
    ///
    /// # Examples
    ///
    /// ```
    /// # use bracketry::builder::{BracketBuilder, BracketVariant};
    /// let names = ["Ash", "Birch", "Cedar", "Elm", "Fir"];
    /// let tree = BracketBuilder::default()
    ///     .build(&names, 1, BracketVariant::Standard)
    ///     .unwrap();
    /// assert_eq!(tree.match_count(), 5);
    /// assert_eq!(tree.final_match().unwrap().match_index(), 5);
    /// assert_eq!(tree.third_place().unwrap().match_index(), 4);
    /// ```
    pub fn build<S: AsRef<str>>(
        &self,
        participants: &[S],
        start_row: u32,
        variant: BracketVariant,
    ) -> Result<BracketTree, BracketError> {
        if variant == BracketVariant::BothSides {
            return Err(BracketError::UnsupportedVariant(variant.name()));
        }

        let plan = SeedPlan::for_participants(participants.len())?;
        self.check_rows(&plan, start_row)?;

        let participants: Vec<_> = participants
            .iter()
            .zip(1..)
            .map(|(label, seed)| Participant::new(seed, label.as_ref()))
            .collect();

        debug!(
            participants = plan.participants(),
            rounds = plan.total_rounds(),
            byes = plan.byes(),
            variant = variant.name();
            "Planning bracket"
        );

        match variant {
            BracketVariant::Standard => self.build_standard(plan, &participants, start_row),
            BracketVariant::Qualification { qualified } => {
                let rounds_to_play = Self::rounds_to_play(&plan, qualified)?;
                self.build_qualification(plan, &participants, start_row, rounds_to_play)
            }
            BracketVariant::BothSides => Err(BracketError::UnsupportedVariant(variant.name())),
        }
    }

    /// Makes sure every row the draw can touch fits on the grid.
    fn check_rows(&self, plan: &SeedPlan, start_row: u32) -> Result<(), BracketError> {
        let pairings = plan.upper_power_of_two() / 2;
        if self.planner.row_limit(1, pairings).is_none() {
            return Err(BracketError::Config(format!(
                "slot_span {} and match_gap {} leave no room for {} participants",
                self.planner.slot_span(),
                self.planner.match_gap(),
                plan.participants()
            )));
        }
        if start_row == 0 || self.planner.row_limit(start_row, pairings).is_none() {
            return Err(BracketError::InvalidStartRow(start_row));
        }
        Ok(())
    }

    /// Columns a qualification draw plays before `qualified` remain.
    fn rounds_to_play(plan: &SeedPlan, qualified: u32) -> Result<u32, BracketError> {
        let valid = qualified.is_power_of_two() && qualified <= plan.participants() / 2;
        if !valid {
            return Err(BracketError::InvalidQualificationTarget {
                qualified,
                participants: plan.participants() as usize,
            });
        }
        Ok(plan.total_rounds() - qualified.ilog2())
    }

    fn build_standard(
        &self,
        plan: SeedPlan,
        participants: &[Participant],
        start_row: u32,
    ) -> Result<BracketTree, BracketError> {
        let mut ctx = BuildContext::new(plan.first_round());
        self.first_column(&mut ctx, &plan, participants, start_row, MatchRole::Regular)?;

        while ctx.feeders.len() > 2 {
            self.next_column(&mut ctx, MatchRole::Regular)?;
        }

        let semifinal_column = ctx.column;
        let semifinal = ctx.feeders.get(1).copied();

        // The third-place match is numbered just below the final.
        let third_place_index = ctx.take_index();
        let final_key = self
            .next_column(&mut ctx, MatchRole::Final)?
            .ok_or_else(|| BracketError::State("final column produced no match".to_string()))?;
        let third_place =
            self.attach_third_place(&mut ctx, semifinal_column, semifinal, third_place_index)?;

        debug!(
            matches = ctx.registry.len(),
            final_index = ctx.next_index - 1;
            "Built standard bracket"
        );

        Ok(BracketTree::new(
            plan,
            ctx.registry,
            ctx.byes,
            Some(final_key),
            Some(third_place),
        ))
    }

    fn build_qualification(
        &self,
        plan: SeedPlan,
        participants: &[Participant],
        start_row: u32,
        rounds_to_play: u32,
    ) -> Result<BracketTree, BracketError> {
        let mut ctx = BuildContext::new(plan.first_round());
        let role_for = |column: u32| {
            if column == rounds_to_play {
                MatchRole::Qualifier
            } else {
                MatchRole::Regular
            }
        };

        self.first_column(&mut ctx, &plan, participants, start_row, role_for(1))?;
        while ctx.column < rounds_to_play {
            let role = role_for(ctx.column + 1);
            self.next_column(&mut ctx, role)?;
        }

        debug!(
            matches = ctx.registry.len(),
            columns = rounds_to_play;
            "Built qualification bracket"
        );

        Ok(BracketTree::new(plan, ctx.registry, ctx.byes, None, None))
    }

    /// Lays out the first column: play-in matches when the field is short,
    /// the first main round otherwise.
    fn first_column(
        &self,
        ctx: &mut BuildContext,
        plan: &SeedPlan,
        participants: &[Participant],
        start_row: u32,
        role: MatchRole,
    ) -> Result<(), BracketError> {
        let mut index_in_column = 0;

        for (pairing, position) in plan.pairings().into_iter().zip(0..) {
            let rows = self
                .planner
                .first_column_span(start_row, position)
                .ok_or(BracketError::InvalidStartRow(start_row))?;
            match pairing {
                Pairing::Bye { seed } => {
                    let slot = Slot::new(ctx.round + 1, ctx.column + 1, rows.midpoint());
                    let participant = Self::participant(participants, seed)?;
                    ctx.byes.push(Bye::new(participant, slot));
                    ctx.feeders.push(Feeder::Bye { row: slot.row() });
                }
                Pairing::Match {
                    top_seed,
                    bottom_seed,
                } => {
                    index_in_column += 1;
                    let key = MatchKey::new(ctx.column, index_in_column);
                    let index = ctx.take_index();
                    let bracket_match = Match::new(index, key, ctx.round, rows)
                        .with_role(role)
                        .with_entrants(
                            Self::participant(participants, top_seed)?,
                            Self::participant(participants, bottom_seed)?,
                        );
                    ctx.registry.insert(bracket_match)?;
                    ctx.feeders.push(Feeder::Match(key));
                }
            }
        }

        trace!(
            column = ctx.column,
            matches = index_in_column,
            byes = ctx.byes.len();
            "Laid out first column"
        );
        Ok(())
    }

    /// Builds the column fed by the current feeders and returns the key of
    /// its last match.
    ///
    /// A feeder left without a partner is carried over unchanged.
    fn next_column(
        &self,
        ctx: &mut BuildContext,
        role: MatchRole,
    ) -> Result<Option<MatchKey>, BracketError> {
        let feeders = ctx.advance_column();
        let mut index_in_column = 0;
        let mut last = None;

        for pair in feeders.chunks(2) {
            let &[top, bottom] = pair else {
                ctx.feeders.extend_from_slice(pair);
                continue;
            };

            let rows = self.planner.parent_span(top, bottom, &ctx.registry)?;
            index_in_column += 1;
            let key = MatchKey::new(ctx.column, index_in_column);
            let index = ctx.take_index();
            ctx.registry
                .insert(Match::new(index, key, ctx.round, rows).with_role(role))?;
            ctx.feeders.push(Feeder::Match(key));
            last = Some(key);
        }

        trace!(column = ctx.column, matches = index_in_column; "Laid out column");
        Ok(last)
    }

    /// Hangs the third-place match below the semifinal that feeds the
    /// final's bottom slot.
    fn attach_third_place(
        &self,
        ctx: &mut BuildContext,
        semifinal_column: u32,
        semifinal: Option<Feeder>,
        match_index: u32,
    ) -> Result<MatchKey, BracketError> {
        let missing = BracketError::MissingSemifinalMatch {
            column: semifinal_column,
        };
        let Some(Feeder::Match(semifinal_key)) = semifinal else {
            return Err(missing);
        };
        let semifinal = ctx.registry.by_key(semifinal_key).ok_or(missing)?;

        let rows = self.planner.third_place_span(semifinal).ok_or_else(|| {
            BracketError::Config("third_place_offset pushes the third-place match off the grid".to_string())
        })?;
        let position = ctx.registry.column(semifinal_column).len() as u32 + 1;
        let key = MatchKey::new(semifinal_column, position);
        // Played alongside the final, though drawn in the semifinal column.
        let bracket_match =
            Match::new(match_index, key, ctx.round, rows).with_role(MatchRole::ThirdPlace);
        ctx.registry.insert(bracket_match)?;

        trace!(match_index = match_index, column = semifinal_column; "Attached third-place match");
        Ok(key)
    }

    fn participant(participants: &[Participant], seed: u32) -> Result<Participant, BracketError> {
        participants
            .get(seed as usize - 1)
            .cloned()
            .ok_or_else(|| BracketError::State(format!("no participant with seed {seed}")))
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::seed::{MAX_PARTICIPANTS, MIN_PARTICIPANTS};

    // ===================
    // Strategies
    // ===================

    fn field_strategy() -> impl Strategy<Value = usize> {
        MIN_PARTICIPANTS..=MAX_PARTICIPANTS
    }

    fn qualification_strategy() -> impl Strategy<Value = (usize, u32)> {
        field_strategy().prop_flat_map(|count| {
            let max_exp = (count as u32 / 2).ilog2();
            (Just(count), (0..=max_exp).prop_map(|exp| 1u32 << exp))
        })
    }

    fn layout_strategy() -> impl Strategy<Value = PositionPlanner> {
        (3u32..9, 0u32..4, 1u32..4).prop_map(|(span, gap, offset)| PositionPlanner::new(span, gap, offset))
    }

    fn build_tree(
        count: usize,
        planner: PositionPlanner,
        variant: BracketVariant,
    ) -> Result<BracketTree, TestCaseError> {
        let names: Vec<_> = (1..=count).map(|i| format!("P{i}")).collect();
        BracketBuilder::new(planner)
            .build(&names, 1, variant)
            .map_err(|err| TestCaseError::fail(err.to_string()))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// N-1 decisive matches plus the third-place match, numbered 1..=N.
    fn check_match_count_and_numbering(count: usize) -> Result<(), TestCaseError> {
        let tree = build_tree(count, PositionPlanner::default(), BracketVariant::Standard)?;

        let decisive = tree
            .matches()
            .filter(|m| m.role() != MatchRole::ThirdPlace)
            .count();
        prop_assert_eq!(decisive, count - 1);

        let mut indices: Vec<_> = tree.matches().map(Match::match_index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (1..=count as u32).collect::<Vec<_>>());
        Ok(())
    }

    /// Positions inside each column are contiguous from 1.
    fn check_positions_contiguous(count: usize) -> Result<(), TestCaseError> {
        let tree = build_tree(count, PositionPlanner::default(), BracketVariant::Standard)?;

        for column in tree.registry().columns() {
            let positions: Vec<_> = tree
                .registry()
                .column(column)
                .iter()
                .map(|m| m.index_in_column())
                .collect();
            prop_assert_eq!(positions.clone(), (1..=positions.len() as u32).collect::<Vec<_>>());
        }
        Ok(())
    }

    /// Later-column matches span exactly between the anchors of their feeders.
    fn check_midpoint_rule(count: usize, planner: PositionPlanner) -> Result<(), TestCaseError> {
        let tree = build_tree(count, planner, BracketVariant::Standard)?;
        let registry = tree.registry();

        for m in tree.matches() {
            prop_assert_eq!(m.middle().row(), (m.top().row() + m.bottom().row()).div_ceil(2));
            if m.column() == 1 || m.role() == MatchRole::ThirdPlace {
                continue;
            }

            let mut anchors: HashSet<u32> = registry
                .column(m.column() - 1)
                .iter()
                .filter(|child| child.role() != MatchRole::ThirdPlace)
                .map(|child| child.middle().row())
                .collect();
            anchors.extend(
                tree.byes()
                    .iter()
                    .filter(|bye| bye.slot().column() == m.column())
                    .map(|bye| bye.slot().row()),
            );

            prop_assert!(anchors.contains(&m.top().row()), "top of {} unfed", m.match_index());
            prop_assert!(anchors.contains(&m.bottom().row()), "bottom of {} unfed", m.match_index());
        }
        Ok(())
    }

    /// Matches that share a column never share a row.
    fn check_no_overlap(count: usize, planner: PositionPlanner) -> Result<(), TestCaseError> {
        let tree = build_tree(count, planner, BracketVariant::Standard)?;

        for column in tree.registry().columns() {
            let mut spans: Vec<_> = tree
                .registry()
                .column(column)
                .iter()
                .map(|m| m.rows())
                .collect();
            spans.sort_by_key(|span| span.start());
            for pair in spans.windows(2) {
                prop_assert!(pair[0].end() < pair[1].start(), "{:?} overlaps {:?}", pair[0], pair[1]);
            }
        }
        Ok(())
    }

    /// Qualification stops with exactly `qualified` flagged matches.
    fn check_qualification(count: usize, qualified: u32) -> Result<(), TestCaseError> {
        let tree = build_tree(
            count,
            PositionPlanner::default(),
            BracketVariant::Qualification { qualified },
        )?;

        prop_assert!(tree.final_match().is_none());
        prop_assert!(tree.third_place().is_none());
        prop_assert_eq!(tree.qualifiers().len() as u32, qualified);
        prop_assert_eq!(tree.match_count(), count - qualified as usize);

        let last_index = tree.matches().map(Match::match_index).max().unwrap_or(0);
        for m in tree.qualifiers() {
            prop_assert!(m.match_index() > last_index - qualified);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn match_count_and_numbering(count in field_strategy()) {
            check_match_count_and_numbering(count)?;
        }

        #[test]
        fn positions_contiguous(count in field_strategy()) {
            check_positions_contiguous(count)?;
        }

        #[test]
        fn midpoint_rule(count in field_strategy(), planner in layout_strategy()) {
            check_midpoint_rule(count, planner)?;
        }

        #[test]
        fn no_overlap(count in field_strategy(), planner in layout_strategy()) {
            check_no_overlap(count, planner)?;
        }

        #[test]
        fn qualification((count, qualified) in qualification_strategy()) {
            check_qualification(count, qualified)?;
        }
    }
}
