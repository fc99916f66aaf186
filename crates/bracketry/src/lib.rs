//! Bracketry - Single-elimination tournament brackets laid out on a grid.
//!
//! Seeding, match placement and numbering for fields of 3 to 64
//! participants. A bracket is planned in memory first and only then painted
//! onto a [`Canvas`](canvas::Canvas); a painted bracket can be read back from
//! the named regions it leaves behind.

pub mod builder;
pub mod canvas;
pub mod config;
pub mod layout;
pub mod paint;
pub mod seed;
pub mod structure;

mod error;
mod export;

pub use bracketry_core::{color, draw, grid};

pub use error::BracketError;

use log::{debug, info};

use builder::{BracketBuilder, BracketVariant};
use canvas::{Canvas, GridCanvas};
use config::AppConfig;
use export::Exporter;
use layout::PositionPlanner;
use paint::Painter;
use structure::{BracketReader, BracketRegistry, BracketTree};

/// Entry point for building, removing and rendering brackets.
///
/// # Examples
///
/// ```
/// use bracketry::{BracketMaker, builder::BracketVariant, canvas::GridCanvas};
///
/// let maker = BracketMaker::default();
/// let mut canvas = GridCanvas::new();
///
/// let names = ["North", "South", "East", "West", "Centre", "Harbour"];
/// let tree = maker
///     .build_bracket(&mut canvas, &names, 1, BracketVariant::Standard)
///     .unwrap();
/// assert_eq!(tree.match_count(), 6);
///
/// let registry = maker.read_bracket(&canvas).unwrap();
/// assert_eq!(registry.len(), 6);
///
/// let svg = maker.render_svg(&canvas).unwrap();
/// assert!(svg.contains("<svg"));
///
/// assert_eq!(maker.remove_bracket(&mut canvas).unwrap(), 6);
/// ```
#[derive(Debug, Default)]
pub struct BracketMaker {
    config: AppConfig,
}

impl BracketMaker {
    /// Create a bracket maker with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Plan a bracket without drawing anything.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` for an invalid layout configuration, an invalid
    /// participant count, start row or qualification target, an unsupported
    /// variant, or an internally inconsistent tree.
    pub fn plan<S: AsRef<str>>(
        &self,
        participants: &[S],
        start_row: u32,
        variant: BracketVariant,
    ) -> Result<BracketTree, BracketError> {
        self.config.layout().validate()?;
        let planner = PositionPlanner::from(self.config.layout());
        BracketBuilder::new(planner).build(participants, start_row, variant)
    }

    /// Plan a bracket and paint it onto `canvas`.
    ///
    /// Nothing is drawn unless planning succeeds.
    ///
    /// # Errors
    ///
    /// Returns the planning errors of [`BracketMaker::plan`].
    pub fn build_bracket<C, S>(
        &self,
        canvas: &mut C,
        participants: &[S],
        start_row: u32,
        variant: BracketVariant,
    ) -> Result<BracketTree, BracketError>
    where
        C: Canvas + ?Sized,
        S: AsRef<str>,
    {
        info!(
            participants = participants.len(),
            start_row = start_row,
            variant = variant.name();
            "Building bracket"
        );
        let tree = self.plan(participants, start_row, variant)?;

        Painter::new(self.config.layout().region_prefix()).paint(canvas, &tree);
        info!(matches = tree.match_count(); "Bracket built");
        Ok(tree)
    }

    /// Remove any bracket already on `canvas`, then build a new one.
    ///
    /// The new bracket is planned before the old one is removed, so an
    /// invalid request leaves the canvas untouched.
    ///
    /// # Errors
    ///
    /// Returns the planning errors of [`BracketMaker::plan`].
    pub fn rebuild_bracket<C, S>(
        &self,
        canvas: &mut C,
        participants: &[S],
        start_row: u32,
        variant: BracketVariant,
    ) -> Result<BracketTree, BracketError>
    where
        C: Canvas + ?Sized,
        S: AsRef<str>,
    {
        let tree = self.plan(participants, start_row, variant)?;
        let removed = self.remove_bracket(canvas)?;
        debug!(removed = removed; "Cleared previous bracket");

        Painter::new(self.config.layout().region_prefix()).paint(canvas, &tree);
        info!(matches = tree.match_count(); "Bracket rebuilt");
        Ok(tree)
    }

    /// Remove every match region with the configured prefix and clear the
    /// drawing area. Returns the number of regions removed.
    ///
    /// Removing from a canvas without a bracket succeeds and removes nothing.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::Config` for an invalid layout configuration.
    pub fn remove_bracket<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<usize, BracketError> {
        self.config.layout().validate()?;
        let prefix = self.config.layout().region_prefix();

        let mut removed = 0;
        for region in canvas.named_regions(prefix) {
            if region.is_match_of(prefix) && canvas.remove_named_region(region.name()) {
                removed += 1;
            }
        }
        canvas.clear_area();

        info!(removed = removed, prefix = prefix; "Bracket removed");
        Ok(removed)
    }

    /// Reconstruct the match registry from the regions on `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::State` if the persisted regions overlap.
    pub fn read_bracket<C: Canvas + ?Sized>(&self, canvas: &C) -> Result<BracketRegistry, BracketError> {
        BracketReader::new(self.config.layout().region_prefix()).read(canvas)
    }

    /// Render a grid canvas to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::Export` for an invalid style or an empty canvas.
    pub fn render_svg(&self, canvas: &GridCanvas) -> Result<String, BracketError> {
        let mut exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.export_canvas(canvas)?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::seed::{MAX_PARTICIPANTS, MIN_PARTICIPANTS};

    fn field_strategy() -> impl Strategy<Value = usize> {
        MIN_PARTICIPANTS..=MAX_PARTICIPANTS
    }

    fn variant_strategy(count: usize) -> impl Strategy<Value = BracketVariant> {
        let max_exp = (count as u32 / 2).ilog2();
        prop_oneof![
            Just(BracketVariant::Standard),
            (0..=max_exp).prop_map(|exp| BracketVariant::Qualification { qualified: 1 << exp }),
        ]
    }

    fn case_strategy() -> impl Strategy<Value = (usize, u32, BracketVariant)> {
        field_strategy().prop_flat_map(|count| (Just(count), 1u32..40, variant_strategy(count)))
    }

    /// Reading the painted regions recovers every match's column position.
    fn check_read_back(count: usize, start_row: u32, variant: BracketVariant) -> Result<(), TestCaseError> {
        let maker = BracketMaker::default();
        let names: Vec<_> = (1..=count).map(|i| format!("P{i}")).collect();
        let mut canvas = GridCanvas::new();

        let tree = maker
            .build_bracket(&mut canvas, &names, start_row, variant)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let registry = maker
            .read_bracket(&canvas)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(registry.len(), tree.match_count());
        for built in tree.matches() {
            let read = registry.by_match_index(built.match_index());
            prop_assert!(read.is_some(), "match {} not read back", built.match_index());
            if let Some(read) = read {
                prop_assert_eq!(read.key(), built.key());
                prop_assert_eq!(read.middle(), built.middle());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn read_back((count, start_row, variant) in case_strategy()) {
            check_read_back(count, start_row, variant)?;
        }
    }
}
