//! An in-memory grid canvas.
//!
//! [`GridCanvas`] records every command it receives as plain data. It can be
//! saved to and loaded from a TOML document, which makes it usable as a
//! persistent drawing surface between runs, and it is what the SVG exporter
//! renders.

use std::{fs, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use bracketry_core::grid::{RowSpan, Slot};

pub use bracketry_core::canvas::{Canvas, CellContent, MatchRecord, MiddleLabel, NamedRegion};

use crate::BracketError;

/// A placed endpoint cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    column: u32,
    row: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<CellContent>,
}

impl Cell {
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn content(&self) -> Option<&CellContent> {
        self.content.as_ref()
    }
}

/// A vertical connector drawn in one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    column: u32,
    rows: RowSpan,
}

impl Connector {
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn rows(&self) -> RowSpan {
        self.rows
    }
}

/// A centered label written at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    column: u32,
    row: u32,
    label: MiddleLabel,
}

impl Label {
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn label(&self) -> MiddleLabel {
        self.label
    }
}

/// A grid surface held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridCanvas {
    #[serde(default)]
    cells: Vec<Cell>,
    #[serde(default)]
    connectors: Vec<Connector>,
    #[serde(default)]
    labels: Vec<Label>,
    #[serde(default)]
    regions: Vec<NamedRegion>,
}

impl GridCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a canvas saved with [`GridCanvas::save`].
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Io`] if the file cannot be read and
    /// [`BracketError::State`] if it is not a valid canvas document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BracketError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let canvas = Self::from_toml(&text)?;
        debug!(
            path = path.display().to_string(),
            regions = canvas.regions.len();
            "Loaded canvas state"
        );
        Ok(canvas)
    }

    /// Writes the canvas as TOML to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::State`] if serialization fails and
    /// [`BracketError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BracketError> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?)?;
        info!(path = path.display().to_string(); "Saved canvas state");
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, BracketError> {
        toml::to_string(self).map_err(|err| BracketError::State(err.to_string()))
    }

    pub fn from_toml(text: &str) -> Result<Self, BracketError> {
        toml::from_str(text).map_err(|err| BracketError::State(err.to_string()))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn regions(&self) -> &[NamedRegion] {
        &self.regions
    }

    /// Returns the cell placed at `(column, row)`.
    pub fn cell(&self, column: u32, row: u32) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|cell| cell.column == column && cell.row == row)
    }

    /// Returns the label written at `(column, row)`.
    pub fn label_at(&self, column: u32, row: u32) -> Option<MiddleLabel> {
        self.labels
            .iter()
            .find(|label| label.column == column && label.row == row)
            .map(|label| label.label)
    }

    /// `true` when nothing has been drawn or registered.
    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
            && self.connectors.is_empty()
            && self.labels.is_empty()
            && self.regions.is_empty()
    }

    /// The largest `(column, row)` touched by any cell, connector or label.
    pub fn extent(&self) -> (u32, u32) {
        let cells = self.cells.iter().map(|cell| (cell.column, cell.row));
        let labels = self.labels.iter().map(|label| (label.column, label.row));
        let connectors = self
            .connectors
            .iter()
            .map(|connector| (connector.column, connector.rows.end()));

        cells
            .chain(labels)
            .chain(connectors)
            .fold((0, 0), |(max_column, max_row), (column, row)| {
                (max_column.max(column), max_row.max(row))
            })
    }
}

impl Canvas for GridCanvas {
    fn place_match(&mut self, slot: Slot, content: Option<&CellContent>) {
        let (column, row) = (slot.column(), slot.row());
        match self
            .cells
            .iter_mut()
            .find(|cell| cell.column == column && cell.row == row)
        {
            // An empty endpoint never erases a name already written there.
            Some(cell) => {
                if let Some(content) = content {
                    cell.content = Some(content.clone());
                }
            }
            None => self.cells.push(Cell {
                column,
                row,
                content: content.cloned(),
            }),
        }
    }

    fn draw_connector(&mut self, rows: RowSpan, column: u32) {
        self.connectors.push(Connector { column, rows });
    }

    fn set_middle_label(&mut self, slot: Slot, label: &MiddleLabel) {
        let (column, row) = (slot.column(), slot.row());
        self.labels
            .retain(|existing| existing.column != column || existing.row != row);
        self.labels.push(Label {
            column,
            row,
            label: *label,
        });
    }

    fn register_named_region(&mut self, name: &str, record: MatchRecord) {
        self.regions.retain(|region| region.name() != name);
        self.regions.push(NamedRegion::new(name, record));
    }

    fn named_regions(&self, prefix: &str) -> Vec<NamedRegion> {
        self.regions
            .iter()
            .filter(|region| region.is_match_of(prefix))
            .cloned()
            .collect()
    }

    fn remove_named_region(&mut self, name: &str) -> bool {
        let before = self.regions.len();
        self.regions.retain(|region| region.name() != name);
        self.regions.len() != before
    }

    fn clear_area(&mut self) {
        self.cells.clear();
        self.connectors.clear();
        self.labels.clear();
    }
}
