//! Configuration types for bracket layout and rendering.
//!
//! This module provides configuration structures that control how brackets
//! are laid out on the grid and styled when exported. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field is
//! optional and falls back to the defaults documented on it.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Grid constants used by the position planner.
//! - [`StyleConfig`] - Colors, cell sizes and connector style for SVG export.
//!
//! # Example
//!
//! ```
//! # use bracketry::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().slot_span(), 5);
//! assert!(config.style().winner_color().is_ok());
//! ```

use serde::Deserialize;

use bracketry_core::{color::Color, draw::StrokeStyle, grid::CellMetrics};

use crate::BracketError;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Grid constants for bracket layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rows covered by one first-round match, both endpoints included.
    /// Defaults to 5.
    slot_span: u32,

    /// Empty rows between two first-round matches. Defaults to 1.
    match_gap: u32,

    /// Rows between the lower semifinal's bottom endpoint and the top of the
    /// third-place match. Defaults to 2.
    third_place_offset: u32,

    /// Prefix of the named region registered for every match.
    /// Defaults to `BracketRange`.
    region_prefix: String,
}

impl LayoutConfig {
    /// Creates a layout configuration with explicit grid constants.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Config`] if `slot_span` is below 3 (the top,
    /// middle and bottom rows of a match must differ).
    pub fn new(slot_span: u32, match_gap: u32, third_place_offset: u32) -> Result<Self, BracketError> {
        let config = Self {
            slot_span,
            match_gap,
            third_place_offset,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy using `prefix` for registered region names.
    pub fn with_region_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.region_prefix = prefix.into();
        self
    }

    pub fn slot_span(&self) -> u32 {
        self.slot_span
    }

    pub fn match_gap(&self) -> u32 {
        self.match_gap
    }

    pub fn third_place_offset(&self) -> u32 {
        self.third_place_offset
    }

    pub fn region_prefix(&self) -> &str {
        &self.region_prefix
    }

    /// Checks the constants describe a drawable bracket.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Config`] for a slot span below 3 or an empty
    /// region prefix.
    pub fn validate(&self) -> Result<(), BracketError> {
        if self.slot_span < 3 {
            return Err(BracketError::Config(format!(
                "slot_span must be at least 3, got {}",
                self.slot_span
            )));
        }
        if self.region_prefix.is_empty() {
            return Err(BracketError::Config(
                "region_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_span: 5,
            match_gap: 1,
            third_place_offset: 2,
            region_prefix: "BracketRange".to_string(),
        }
    }
}

/// Visual styling configuration for exported brackets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Page background color; transparent when unset.
    background_color: Option<String>,

    /// Fill behind the `WINNER` marker. Defaults to `yellow`.
    winner_color: String,

    /// Fill behind the `BRONZE` marker. Defaults to `orange`.
    bronze_color: String,

    /// Fill behind `QUALIFIED` markers. Defaults to `lightgreen`.
    qualified_color: String,

    /// Color of endpoint underlines and connectors. Defaults to `black`.
    line_color: String,

    /// Connector pattern: `solid`, `dashed` or `dotted`. Defaults to `solid`.
    connector_style: String,

    /// Stroke width of connectors in pixels. Defaults to 1.5.
    connector_width: f32,

    /// Pixel width of one grid column. Defaults to 180.
    column_width: f32,

    /// Pixel height of one grid row. Defaults to 22.
    row_height: f32,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn winner_color(&self) -> Result<Color, String> {
        Color::new(&self.winner_color).map_err(|err| format!("Invalid winner color in config: {err}"))
    }

    pub fn bronze_color(&self) -> Result<Color, String> {
        Color::new(&self.bronze_color).map_err(|err| format!("Invalid bronze color in config: {err}"))
    }

    pub fn qualified_color(&self) -> Result<Color, String> {
        Color::new(&self.qualified_color)
            .map_err(|err| format!("Invalid qualified color in config: {err}"))
    }

    pub fn line_color(&self) -> Result<Color, String> {
        Color::new(&self.line_color).map_err(|err| format!("Invalid line color in config: {err}"))
    }

    pub fn connector_style(&self) -> Result<StrokeStyle, String> {
        self.connector_style.parse()
    }

    pub fn connector_width(&self) -> f32 {
        self.connector_width
    }

    /// Returns the pixel size of a grid cell.
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics::new(self.column_width, self.row_height)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            winner_color: "yellow".to_string(),
            bronze_color: "orange".to_string(),
            qualified_color: "lightgreen".to_string(),
            line_color: "black".to_string(),
            connector_style: "solid".to_string(),
            connector_width: 1.5,
            column_width: 180.0,
            row_height: 22.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.slot_span(), 5);
        assert_eq!(layout.match_gap(), 1);
        assert_eq!(layout.third_place_offset(), 2);
        assert_eq!(layout.region_prefix(), "BracketRange");
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_layout_new_rejects_short_span() {
        let err = LayoutConfig::new(2, 1, 2).unwrap_err();
        assert!(matches!(err, BracketError::Config(_)));
    }

    #[test]
    fn test_layout_rejects_empty_prefix() {
        let layout = LayoutConfig::default().with_region_prefix("");
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_style_defaults_parse() {
        let style = StyleConfig::default();
        assert!(style.background_color().unwrap().is_none());
        assert!(style.winner_color().is_ok());
        assert!(style.bronze_color().is_ok());
        assert!(style.qualified_color().is_ok());
        assert!(style.line_color().is_ok());
        assert_eq!(style.connector_style(), Ok(StrokeStyle::Solid));
    }

    #[test]
    fn test_style_invalid_color() {
        let style: StyleConfig = toml::from_str("winner_color = \"not-a-color\"").unwrap();
        let err = style.winner_color().unwrap_err();
        assert!(err.contains("Invalid winner color"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            match_gap = 3

            [style]
            row_height = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().match_gap(), 3);
        assert_eq!(config.layout().slot_span(), 5);
        assert_eq!(config.style().cell_metrics().row_height(), 30.0);
        assert_eq!(config.style().cell_metrics().column_width(), 180.0);
    }
}
