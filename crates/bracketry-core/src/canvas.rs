//! The abstract drawing surface a bracket is painted onto.
//!
//! The layout engine never talks to a concrete surface while planning. Once a
//! bracket tree is fully computed, it is replayed onto a [`Canvas`] as a short
//! list of commands: place an endpoint, draw a connector, write a label,
//! register a named region. Any surface that can honor those commands (an
//! in-memory grid, a spreadsheet, a terminal) can host a bracket.
//!
//! Named regions are the persisted identity of a match. Each one carries a
//! typed [`MatchRecord`], so a later run can recover the bracket structure
//! without parsing names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{RowSpan, Slot};

/// Content written into an endpoint cell.
///
/// Text is shown as-is. A formula is a reference understood by the host
/// surface (a spreadsheet formula, for instance) and is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Text(String),
    Formula(String),
}

impl CellContent {
    /// Returns the raw string, including the leading `=` of a formula.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Formula(text) => text,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, Self::Formula(_))
    }
}

impl From<&str> for CellContent {
    /// Classifies a label: a leading `=` marks a formula.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bracketry_core::canvas::CellContent;
    /// assert!(CellContent::from("=B2").is_formula());
    /// assert!(!CellContent::from("Team A").is_formula());
    /// ```
    fn from(label: &str) -> Self {
        if label.starts_with('=') {
            Self::Formula(label.to_string())
        } else {
            Self::Text(label.to_string())
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A centered, styled label placed on a match's middle row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MiddleLabel {
    /// The match number shown beside the connector.
    MatchNumber(u32),
    /// Marks the champion's cell after the final.
    Winner,
    /// Marks the third-place finisher's cell.
    Bronze,
    /// Marks a participant that advances out of a qualification draw.
    Qualified,
}

impl fmt::Display for MiddleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchNumber(number) => write!(f, "{number}"),
            Self::Winner => f.write_str("WINNER"),
            Self::Bronze => f.write_str("BRONZE"),
            Self::Qualified => f.write_str("QUALIFIED"),
        }
    }
}

/// The persisted identity of a drawn match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    match_index: u32,
    round: u32,
    column: u32,
    top_row: u32,
    bottom_row: u32,
}

impl MatchRecord {
    pub fn new(match_index: u32, round: u32, column: u32, rows: RowSpan) -> Self {
        Self {
            match_index,
            round,
            column,
            top_row: rows.start(),
            bottom_row: rows.end(),
        }
    }

    pub fn match_index(&self) -> u32 {
        self.match_index
    }

    /// Tournament round of the match; 0 for a play-in match.
    ///
    /// Round and column usually move together, but the third-place match is
    /// played in the final's round and drawn in the semifinal column, one
    /// round ahead of the other matches in that column.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn top_row(&self) -> u32 {
        self.top_row
    }

    pub fn bottom_row(&self) -> u32 {
        self.bottom_row
    }

    pub fn rows(&self) -> RowSpan {
        RowSpan::new(self.top_row, self.bottom_row)
    }
}

/// A named region as listed back from a canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRegion {
    name: String,
    record: MatchRecord,
}

impl NamedRegion {
    pub fn new(name: impl Into<String>, record: MatchRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self) -> &MatchRecord {
        &self.record
    }

    /// `true` when the name is exactly `prefix` followed by the record's
    /// match number, so `Group` never claims a `GroupB3` region.
    pub fn is_match_of(&self, prefix: &str) -> bool {
        self.name
            .strip_prefix(prefix)
            .is_some_and(|number| number == self.record.match_index.to_string())
    }
}

/// A grid surface that brackets can be drawn onto.
///
/// All commands are infallible from the engine's point of view; a surface
/// that can fail should buffer and report on its own flush step.
pub trait Canvas {
    /// Draws a match endpoint at `slot`, optionally writing `content` into it.
    fn place_match(&mut self, slot: Slot, content: Option<&CellContent>);

    /// Marks a vertical connector over `rows` in `column`.
    fn draw_connector(&mut self, rows: RowSpan, column: u32);

    /// Writes a centered label at `slot`.
    fn set_middle_label(&mut self, slot: Slot, label: &MiddleLabel);

    /// Persists a match identity under `name`, replacing any region of the
    /// same name.
    fn register_named_region(&mut self, name: &str, record: MatchRecord);

    /// Lists every persisted region named `<prefix><match_index>`, where
    /// `match_index` is the number stored in the region's record.
    fn named_regions(&self, prefix: &str) -> Vec<NamedRegion>;

    /// Removes the region called `name`. Returns `false` if it did not exist.
    fn remove_named_region(&mut self, name: &str) -> bool;

    /// Wipes all cells, connectors and labels from the surface.
    ///
    /// Named regions are left alone; they are removed one by one.
    fn clear_area(&mut self);
}
