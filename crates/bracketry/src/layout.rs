//! Row placement for every match of a bracket.
//!
//! The first column is laid out on a fixed stride. Every later column is
//! derived from the one before it: a match spans from the middle row of its
//! upper feeder to the middle row of its lower feeder, and its own middle row
//! is the rounded-up midpoint of that span.
//!
//! ```text
//!  row 1  ──── A            (top of pairing 1)
//!  row 3       │ 1 ──── ┐   (middle of pairing 1 = top of match 3)
//!  row 5  ──── B        │
//!                       │ 3
//!  row 7  ──── C        │
//!  row 9       │ 2 ──── ┘   (middle of pairing 2 = bottom of match 3)
//!  row 11 ──── D
//! ```
//!
//! Planning is pure: it reads the [`BracketRegistry`] and never touches a
//! canvas.

use bracketry_core::grid::RowSpan;

use crate::{
    BracketError,
    config::LayoutConfig,
    structure::{BracketRegistry, Match, MatchKey},
};

/// What feeds an endpoint of a match in the next column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feeder {
    /// The winner of a recorded match.
    Match(MatchKey),
    /// A participant that reached this column without playing, anchored at
    /// `row`.
    Bye { row: u32 },
}

/// Computes row spans from the grid constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionPlanner {
    slot_span: u32,
    match_gap: u32,
    third_place_offset: u32,
}

impl PositionPlanner {
    pub fn new(slot_span: u32, match_gap: u32, third_place_offset: u32) -> Self {
        Self {
            slot_span,
            match_gap,
            third_place_offset,
        }
    }

    pub fn slot_span(&self) -> u32 {
        self.slot_span
    }

    pub fn match_gap(&self) -> u32 {
        self.match_gap
    }

    /// Rows between the tops of two neighbouring first-column pairings.
    pub fn stride(&self) -> u32 {
        self.slot_span.saturating_add(self.match_gap)
    }

    /// Rows of the 0-based `pairing` in the first column, starting at `base`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bracketry::layout::PositionPlanner;
    /// # use bracketry_core::grid::RowSpan;
    /// let planner = PositionPlanner::new(5, 1, 2);
    /// assert_eq!(planner.first_column_span(1, 0), Some(RowSpan::new(1, 5)));
    /// assert_eq!(planner.first_column_span(1, 2), Some(RowSpan::new(13, 17)));
    /// assert_eq!(planner.first_column_span(u32::MAX, 0), None);
    /// ```
    ///
    /// Returns `None` when the pairing would run past the last grid row.
    pub fn first_column_span(&self, base: u32, pairing: u32) -> Option<RowSpan> {
        let offset = pairing.checked_mul(self.slot_span.checked_add(self.match_gap)?)?;
        RowSpan::checked_from_len(base.checked_add(offset)?, self.slot_span)
    }

    /// One row past the lowest row a draw of `pairings` first-column
    /// pairings starting at `base` can reach, third-place match included.
    ///
    /// Every row of such a bracket, and the marker row below any advance
    /// cell, is smaller than this. `None` when it does not fit in a `u32`.
    pub fn row_limit(&self, base: u32, pairings: u32) -> Option<u32> {
        let lowest = self.first_column_span(base, pairings.saturating_sub(1))?;
        lowest
            .end()
            .checked_add(self.third_place_offset)?
            .checked_add(self.slot_span.max(1))
    }

    /// The row the winner of `feeder` is anchored on.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::MissingChildMatch`] when a match feeder is not
    /// in the registry.
    pub fn feeder_row(&self, feeder: Feeder, registry: &BracketRegistry) -> Result<u32, BracketError> {
        match feeder {
            Feeder::Bye { row } => Ok(row),
            Feeder::Match(key) => registry
                .require(key.column(), key.index_in_column())
                .map(|child| child.middle().row()),
        }
    }

    /// Rows of the match fed by `top` and `bottom`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::MissingChildMatch`] when either feeder is a
    /// match missing from the registry.
    pub fn parent_span(
        &self,
        top: Feeder,
        bottom: Feeder,
        registry: &BracketRegistry,
    ) -> Result<RowSpan, BracketError> {
        let top_row = self.feeder_row(top, registry)?;
        let bottom_row = self.feeder_row(bottom, registry)?;
        Ok(RowSpan::new(top_row, bottom_row))
    }

    /// Rows of the third-place match hung below `semifinal`, or `None` when
    /// they would run past the last grid row.
    pub fn third_place_span(&self, semifinal: &Match) -> Option<RowSpan> {
        let start = semifinal
            .bottom()
            .row()
            .checked_add(self.third_place_offset)?;
        RowSpan::checked_from_len(start, self.slot_span)
    }
}

impl From<&LayoutConfig> for PositionPlanner {
    fn from(config: &LayoutConfig) -> Self {
        Self::new(
            config.slot_span(),
            config.match_gap(),
            config.third_place_offset(),
        )
    }
}

impl Default for PositionPlanner {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_first_column(planner: &PositionPlanner, pairings: u32) -> BracketRegistry {
        let mut registry = BracketRegistry::new();
        for i in 0..pairings {
            let rows = planner.first_column_span(1, i).unwrap();
            registry
                .insert(Match::new(i + 1, MatchKey::new(1, i + 1), 1, rows))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_first_column_is_evenly_spaced() {
        let planner = PositionPlanner::default();
        assert_eq!(planner.stride(), 6);

        let tops: Vec<_> = (0..4)
            .map(|i| planner.first_column_span(10, i).unwrap().start())
            .collect();
        assert_eq!(tops, vec![10, 16, 22, 28]);
        assert_eq!(planner.first_column_span(10, 0).unwrap().end(), 14);
    }

    #[test]
    fn test_parent_spans_between_feeder_middles() {
        let planner = PositionPlanner::default();
        let registry = registry_with_first_column(&planner, 2);

        let span = planner
            .parent_span(
                Feeder::Match(MatchKey::new(1, 1)),
                Feeder::Match(MatchKey::new(1, 2)),
                &registry,
            )
            .unwrap();

        assert_eq!(span, RowSpan::new(3, 9));
        assert_eq!(span.midpoint(), 6);
    }

    #[test]
    fn test_parent_span_with_bye_feeder() {
        let planner = PositionPlanner::default();
        let mut registry = BracketRegistry::new();
        registry
            .insert(Match::new(
                1,
                MatchKey::new(1, 2),
                0,
                planner.first_column_span(1, 1).unwrap(),
            ))
            .unwrap();

        let span = planner
            .parent_span(
                Feeder::Bye { row: 3 },
                Feeder::Match(MatchKey::new(1, 2)),
                &registry,
            )
            .unwrap();
        assert_eq!(span, RowSpan::new(3, 9));
    }

    #[test]
    fn test_parent_span_missing_child() {
        let planner = PositionPlanner::default();
        let registry = registry_with_first_column(&planner, 1);

        let err = planner
            .parent_span(
                Feeder::Match(MatchKey::new(1, 1)),
                Feeder::Match(MatchKey::new(1, 2)),
                &registry,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BracketError::MissingChildMatch {
                column: 1,
                index_in_column: 2
            }
        ));
    }

    #[test]
    fn test_third_place_hangs_below_semifinal() {
        let planner = PositionPlanner::default();
        let semifinal = Match::new(6, MatchKey::new(2, 2), 1, RowSpan::new(15, 21));

        assert_eq!(planner.third_place_span(&semifinal), Some(RowSpan::new(23, 27)));
    }

    #[test]
    fn test_spans_past_last_row_are_none() {
        let planner = PositionPlanner::new(u32::MAX / 8, 1, 2);
        assert!(planner.first_column_span(1, 7).is_some());
        assert_eq!(planner.first_column_span(1, 31), None);

        let planner = PositionPlanner::default();
        assert_eq!(planner.first_column_span(u32::MAX - 2, 0), None);
        assert_eq!(
            planner.first_column_span(u32::MAX - 4, 0),
            Some(RowSpan::new(u32::MAX - 4, u32::MAX))
        );

        let semifinal = Match::new(6, MatchKey::new(2, 2), 1, RowSpan::new(u32::MAX - 6, u32::MAX - 3));
        assert_eq!(planner.third_place_span(&semifinal), None);
    }

    #[test]
    fn test_row_limit() {
        let planner = PositionPlanner::default();
        // Lowest of 32 pairings ends on row 191; third place adds 2 + 5 rows.
        assert_eq!(planner.first_column_span(1, 31), Some(RowSpan::new(187, 191)));
        assert_eq!(planner.row_limit(1, 32), Some(198));
        assert_eq!(planner.row_limit(u32::MAX - 197, 32), Some(u32::MAX));
        assert_eq!(planner.row_limit(u32::MAX - 196, 32), None);
        assert_eq!(PositionPlanner::new(u32::MAX / 8, 1, 2).row_limit(1, 32), None);
    }
}
