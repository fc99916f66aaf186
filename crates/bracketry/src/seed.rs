//! Round, bye and play-in accounting for a field of participants.
//!
//! A single-elimination draw is easiest to reason about as a bracket of
//! `upper_power_of_two` slots: the first round has `upper / 2` pairings, some
//! of which are byes when the field is short. When there are byes, the
//! pairings that are played form a dedicated play-in round (round 0) that
//! trims the field to `lower_power_of_two` before the main bracket starts.
//!
//! Byes go to the highest seeds, i.e. the participants entered first, and
//! fill the first pairings top to bottom.

use crate::BracketError;

/// Smallest field a bracket can be drawn for.
pub const MIN_PARTICIPANTS: usize = 3;

/// Largest field a bracket can be drawn for.
pub const MAX_PARTICIPANTS: usize = 64;

/// One first-round pairing of the full power-of-two draw.
///
/// Seeds are 1-based positions in the participant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// The seed advances without playing.
    Bye { seed: u32 },
    /// The two seeds play each other.
    Match { top_seed: u32, bottom_seed: u32 },
}

/// The result of seed planning for a field of `participants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    participants: u32,
    total_rounds: u32,
    lower_power_of_two: u32,
    upper_power_of_two: u32,
    preliminary_matches: u32,
    byes: u32,
}

impl SeedPlan {
    /// Plans rounds, byes and play-in matches for `participants` entrants.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InvalidParticipantCount`] when the count lies
    /// outside `3..=64`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bracketry::seed::SeedPlan;
    /// let plan = SeedPlan::for_participants(6).unwrap();
    /// assert_eq!(plan.total_rounds(), 3);
    /// assert_eq!(plan.preliminary_matches(), 2);
    /// assert_eq!(plan.byes(), 2);
    /// ```
    pub fn for_participants(participants: usize) -> Result<Self, BracketError> {
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&participants) {
            return Err(BracketError::InvalidParticipantCount {
                count: participants,
            });
        }

        let count = participants as u32;
        let upper_power_of_two = count.next_power_of_two();
        let lower_power_of_two = 1 << count.ilog2();

        Ok(Self {
            participants: count,
            total_rounds: upper_power_of_two.trailing_zeros(),
            lower_power_of_two,
            upper_power_of_two,
            preliminary_matches: count - lower_power_of_two,
            byes: upper_power_of_two - count,
        })
    }

    pub fn participants(&self) -> u32 {
        self.participants
    }

    /// `ceil(log2(participants))`: columns needed to reach one champion.
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn lower_power_of_two(&self) -> u32 {
        self.lower_power_of_two
    }

    pub fn upper_power_of_two(&self) -> u32 {
        self.upper_power_of_two
    }

    /// Play-in matches needed to trim the field to `lower_power_of_two`.
    pub fn preliminary_matches(&self) -> u32 {
        self.preliminary_matches
    }

    /// First-round pairings that have no opponent.
    pub fn byes(&self) -> u32 {
        self.byes
    }

    pub fn has_play_in_round(&self) -> bool {
        self.preliminary_matches > 0
    }

    /// Rounds of the power-of-two portion, not counting the play-in round.
    pub fn main_rounds(&self) -> u32 {
        if self.has_play_in_round() {
            self.total_rounds - 1
        } else {
            self.total_rounds
        }
    }

    /// Round number of the first column: 0 for a play-in round, else 1.
    pub fn first_round(&self) -> u32 {
        u32::from(!self.has_play_in_round())
    }

    /// Pairings of the first column, top to bottom.
    ///
    /// The first [`byes`](Self::byes) pairings give seeds `1..=byes` a bye;
    /// the remaining seeds are paired consecutively in entry order.
    pub fn pairings(&self) -> Vec<Pairing> {
        let byes = (1..=self.byes).map(|seed| Pairing::Bye { seed });
        let matches = (self.byes + 1..=self.participants)
            .step_by(2)
            .map(|top_seed| Pairing::Match {
                top_seed,
                bottom_seed: top_seed + 1,
            });

        byes.chain(matches).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_counts() {
        for count in [0, 1, 2, 65, 128] {
            let err = SeedPlan::for_participants(count).unwrap_err();
            assert!(
                matches!(err, BracketError::InvalidParticipantCount { count: c } if c == count),
                "count {count} should be rejected"
            );
        }
    }

    #[test]
    fn test_smallest_field() {
        let plan = SeedPlan::for_participants(3).unwrap();

        assert_eq!(plan.total_rounds(), 2);
        assert_eq!(plan.lower_power_of_two(), 2);
        assert_eq!(plan.upper_power_of_two(), 4);
        assert_eq!(plan.preliminary_matches(), 1);
        assert_eq!(plan.byes(), 1);
        assert_eq!(plan.main_rounds(), 1);
        assert_eq!(plan.first_round(), 0);
        assert_eq!(
            plan.pairings(),
            vec![
                Pairing::Bye { seed: 1 },
                Pairing::Match {
                    top_seed: 2,
                    bottom_seed: 3
                },
            ]
        );
    }

    #[test]
    fn test_power_of_two_field_has_no_play_in() {
        let plan = SeedPlan::for_participants(64).unwrap();

        assert_eq!(plan.total_rounds(), 6);
        assert_eq!(plan.preliminary_matches(), 0);
        assert_eq!(plan.byes(), 0);
        assert!(!plan.has_play_in_round());
        assert_eq!(plan.first_round(), 1);
        assert_eq!(plan.main_rounds(), 6);
        assert_eq!(plan.pairings().len(), 32);
        assert_eq!(
            plan.pairings()[31],
            Pairing::Match {
                top_seed: 63,
                bottom_seed: 64
            }
        );
    }

    #[test]
    fn test_byes_go_to_highest_seeds() {
        let plan = SeedPlan::for_participants(11).unwrap();

        assert_eq!(plan.byes(), 5);
        assert_eq!(plan.preliminary_matches(), 3);

        let pairings = plan.pairings();
        assert_eq!(pairings.len(), 8);
        assert_eq!(
            &pairings[..5],
            &(1..=5).map(|seed| Pairing::Bye { seed }).collect::<Vec<_>>()[..]
        );
        assert_eq!(
            pairings[5],
            Pairing::Match {
                top_seed: 6,
                bottom_seed: 7
            }
        );
        assert_eq!(
            pairings[7],
            Pairing::Match {
                top_seed: 10,
                bottom_seed: 11
            }
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn field_strategy() -> impl Strategy<Value = usize> {
        MIN_PARTICIPANTS..=MAX_PARTICIPANTS
    }

    /// `2^(rounds-1) < N <= 2^rounds` and rounds is `ceil(log2 N)`.
    fn check_round_bounds(count: usize) -> Result<(), TestCaseError> {
        let plan = SeedPlan::for_participants(count)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let rounds = plan.total_rounds();
        let n = count as u32;

        prop_assert!(2u32.pow(rounds - 1) < n);
        prop_assert!(n <= 2u32.pow(rounds));
        prop_assert_eq!(rounds, (count as f64).log2().ceil() as u32);
        Ok(())
    }

    /// Pairings cover every seed exactly once and match the bye/play-in counts.
    fn check_pairings_cover_field(count: usize) -> Result<(), TestCaseError> {
        let plan = SeedPlan::for_participants(count)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let pairings = plan.pairings();

        prop_assert_eq!(pairings.len() as u32, plan.upper_power_of_two() / 2);

        let mut seeds = Vec::new();
        let mut played = 0;
        for pairing in &pairings {
            match *pairing {
                Pairing::Bye { seed } => seeds.push(seed),
                Pairing::Match {
                    top_seed,
                    bottom_seed,
                } => {
                    played += 1;
                    seeds.push(top_seed);
                    seeds.push(bottom_seed);
                }
            }
        }
        seeds.sort_unstable();

        prop_assert_eq!(seeds, (1..=count as u32).collect::<Vec<_>>());
        if plan.has_play_in_round() {
            prop_assert_eq!(played, plan.preliminary_matches());
        }
        prop_assert_eq!(pairings.len() as u32 - played, plan.byes());
        Ok(())
    }

    proptest! {
        #[test]
        fn round_bounds(count in field_strategy()) {
            check_round_bounds(count)?;
        }

        #[test]
        fn pairings_cover_field(count in field_strategy()) {
            check_pairings_cover_field(count)?;
        }
    }
}
