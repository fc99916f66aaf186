//! Append-only store of the matches a build produces.
//!
//! Matches are keyed by `(column, index_in_column)` and kept in creation
//! order, which is also the order they are painted in. A key is written once;
//! nothing is ever removed or replaced.

use indexmap::{IndexMap, map::Entry};
use log::trace;

use super::{Match, MatchKey};
use crate::BracketError;

/// All matches of one bracket, in creation order.
#[derive(Debug, Clone, Default)]
pub struct BracketRegistry {
    matches: IndexMap<MatchKey, Match>,
}

impl BracketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a match.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::State`] if a match already occupies the same
    /// column position.
    pub fn insert(&mut self, bracket_match: Match) -> Result<MatchKey, BracketError> {
        let key = bracket_match.key();
        match self.matches.entry(key) {
            Entry::Occupied(_) => Err(BracketError::State(format!(
                "match already recorded at column {}, position {}",
                key.column(),
                key.index_in_column()
            ))),
            Entry::Vacant(entry) => {
                trace!(
                    match_index = bracket_match.match_index(),
                    column = key.column(),
                    index_in_column = key.index_in_column();
                    "Recorded match"
                );
                entry.insert(bracket_match);
                Ok(key)
            }
        }
    }

    /// Returns the match at a column position, if recorded.
    pub fn get(&self, column: u32, index_in_column: u32) -> Option<&Match> {
        self.matches.get(&MatchKey::new(column, index_in_column))
    }

    /// Returns the match for `key`, if recorded.
    pub fn by_key(&self, key: MatchKey) -> Option<&Match> {
        self.matches.get(&key)
    }

    /// Returns the match at a column position.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::MissingChildMatch`] if no match is recorded there.
    pub fn require(&self, column: u32, index_in_column: u32) -> Result<&Match, BracketError> {
        self.get(column, index_in_column)
            .ok_or(BracketError::MissingChildMatch {
                column,
                index_in_column,
            })
    }

    /// Matches of one column ordered by their position in it.
    pub fn column(&self, column: u32) -> Vec<&Match> {
        let mut matches: Vec<_> = self
            .matches
            .values()
            .filter(|m| m.column() == column)
            .collect();
        matches.sort_by_key(|m| m.index_in_column());
        matches
    }

    /// Distinct columns holding at least one match, left to right.
    pub fn columns(&self) -> Vec<u32> {
        let mut columns: Vec<_> = self.matches.keys().map(|key| key.column()).collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    /// Iterates over matches in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    /// The most recently recorded match.
    pub fn last(&self) -> Option<&Match> {
        self.matches.last().map(|(_, m)| m)
    }

    /// Finds a match by its global match number.
    pub fn by_match_index(&self, match_index: u32) -> Option<&Match> {
        self.matches
            .values()
            .find(|m| m.match_index() == match_index)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
