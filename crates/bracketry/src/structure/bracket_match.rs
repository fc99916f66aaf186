//! Participants, matches and byes.

use bracketry_core::{
    canvas::{CellContent, MatchRecord},
    grid::{RowSpan, Slot},
};

/// An entrant in the draw.
///
/// The seed is the 1-based position of the label in the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    seed: u32,
    label: String,
}

impl Participant {
    pub fn new(seed: u32, label: impl Into<String>) -> Self {
        Self {
            seed,
            label: label.into(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label as it should be written into a cell.
    pub fn content(&self) -> CellContent {
        CellContent::from(self.label.as_str())
    }
}

/// Position of a match within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    column: u32,
    index_in_column: u32,
}

impl MatchKey {
    pub fn new(column: u32, index_in_column: u32) -> Self {
        Self {
            column,
            index_in_column,
        }
    }

    pub fn column(self) -> u32 {
        self.column
    }

    pub fn index_in_column(self) -> u32 {
        self.index_in_column
    }
}

/// What a match's advance cell means once it is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchRole {
    /// The winner moves on to the next column.
    #[default]
    Regular,
    /// The winner is the champion.
    Final,
    /// The winner finishes third.
    ThirdPlace,
    /// The winner leaves a qualification draw as a qualifier.
    Qualifier,
}

/// A single match laid out on the grid.
///
/// `top` and `bottom` are the rows the two entrants are written on,
/// `middle` is where the match number sits and from where the winner
/// advances one column to the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    match_index: u32,
    key: MatchKey,
    top: Slot,
    bottom: Slot,
    middle: Slot,
    connector: Option<RowSpan>,
    role: MatchRole,
    top_entrant: Option<Participant>,
    bottom_entrant: Option<Participant>,
}

impl Match {
    /// Creates a match covering `rows` in the column of `key`.
    ///
    /// The middle row is `ceil((top + bottom) / 2)` and the connector runs
    /// from one row below the top endpoint to the bottom endpoint.
    pub fn new(match_index: u32, key: MatchKey, round: u32, rows: RowSpan) -> Self {
        let column = key.column();
        Self {
            match_index,
            key,
            top: Slot::new(round, column, rows.start()),
            bottom: Slot::new(round, column, rows.end()),
            middle: Slot::new(round, column, rows.midpoint()),
            connector: Some(rows.below_start()),
            role: MatchRole::Regular,
            top_entrant: None,
            bottom_entrant: None,
        }
    }

    /// Rebuilds a match from a persisted record.
    ///
    /// Entrants and role are not persisted; the match comes back as
    /// [`MatchRole::Regular`] with empty endpoints.
    pub fn from_record(record: &MatchRecord, index_in_column: u32) -> Self {
        Self::new(
            record.match_index(),
            MatchKey::new(record.column(), index_in_column),
            record.round(),
            record.rows(),
        )
    }

    pub fn with_role(mut self, role: MatchRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_entrants(mut self, top: Participant, bottom: Participant) -> Self {
        self.top_entrant = Some(top);
        self.bottom_entrant = Some(bottom);
        self
    }

    pub fn match_index(&self) -> u32 {
        self.match_index
    }

    pub fn key(&self) -> MatchKey {
        self.key
    }

    pub fn column(&self) -> u32 {
        self.key.column()
    }

    pub fn index_in_column(&self) -> u32 {
        self.key.index_in_column()
    }

    /// Tournament round of the match. The third-place match shares the
    /// final's round while sitting one column to its left.
    pub fn round(&self) -> u32 {
        self.top.round()
    }

    pub fn top(&self) -> Slot {
        self.top
    }

    pub fn bottom(&self) -> Slot {
        self.bottom
    }

    pub fn middle(&self) -> Slot {
        self.middle
    }

    pub fn connector(&self) -> Option<RowSpan> {
        self.connector
    }

    pub fn role(&self) -> MatchRole {
        self.role
    }

    pub fn top_entrant(&self) -> Option<&Participant> {
        self.top_entrant.as_ref()
    }

    pub fn bottom_entrant(&self) -> Option<&Participant> {
        self.bottom_entrant.as_ref()
    }

    /// Rows from the top endpoint to the bottom endpoint.
    pub fn rows(&self) -> RowSpan {
        RowSpan::new(self.top.row(), self.bottom.row())
    }

    /// The cell the winner is written into.
    pub fn advance_slot(&self) -> Slot {
        self.middle.advance()
    }

    /// The persisted identity of this match.
    pub fn record(&self) -> MatchRecord {
        MatchRecord::new(self.match_index, self.round(), self.column(), self.rows())
    }
}

/// A participant that skips the play-in round.
///
/// The slot is the endpoint of the first main-round match the participant is
/// written into directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bye {
    participant: Participant,
    slot: Slot,
}

impl Bye {
    pub fn new(participant: Participant, slot: Slot) -> Self {
        Self { participant, slot }
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }
}
