//! Recovers a bracket's structure from the regions a previous build left on
//! a canvas.

use log::debug;

use bracketry_core::canvas::{Canvas, NamedRegion};

use super::{BracketRegistry, Match};
use crate::BracketError;

/// Reads persisted match regions back into a [`BracketRegistry`].
#[derive(Debug, Clone)]
pub struct BracketReader<'a> {
    prefix: &'a str,
}

impl<'a> BracketReader<'a> {
    /// Creates a reader for regions named `<prefix><match_index>`.
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    /// Rebuilds the registry from every region with this reader's prefix.
    ///
    /// Regions are grouped by column and ordered by their top row; position
    /// numbering restarts at 1 in every column. Roles are not persisted, so
    /// every match comes back as a regular match.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::State`] if two regions overlap on the same
    /// column and top row.
    pub fn read<C: Canvas + ?Sized>(&self, canvas: &C) -> Result<BracketRegistry, BracketError> {
        let regions: Vec<_> = canvas
            .named_regions(self.prefix)
            .into_iter()
            .filter(|region| region.is_match_of(self.prefix))
            .collect();
        let registry = Self::registry_from_regions(regions)?;
        debug!(prefix = self.prefix, matches = registry.len(); "Read bracket from canvas");
        Ok(registry)
    }

    fn registry_from_regions(mut regions: Vec<NamedRegion>) -> Result<BracketRegistry, BracketError> {
        regions.sort_by_key(|region| (region.record().column(), region.record().top_row()));

        let mut registry = BracketRegistry::new();
        let mut current_column = None;
        let mut index_in_column = 0;

        for region in &regions {
            let record = region.record();
            if current_column != Some(record.column()) {
                current_column = Some(record.column());
                index_in_column = 0;
            }
            index_in_column += 1;

            let previous = registry.column(record.column()).last().map(|m| m.top().row());
            if previous == Some(record.top_row()) {
                return Err(BracketError::State(format!(
                    "regions overlap at column {}, row {}",
                    record.column(),
                    record.top_row()
                )));
            }

            registry.insert(Match::from_record(record, index_in_column))?;
        }

        Ok(registry)
    }
}
