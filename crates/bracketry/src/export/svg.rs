//! SVG rendering of a [`GridCanvas`].
//!
//! Cells are converted to pixels through [`CellMetrics`]. Every endpoint is
//! drawn as an underline along the bottom of its cell, connectors run down
//! the right edge of their column, and markers (`WINNER`, `BRONZE`,
//! `QUALIFIED`) sit on a filled highlight.

use log::debug;
use svg::{Document, node::element as svg_element};

use bracketry_core::{
    apply_stroke,
    canvas::{CellContent, MiddleLabel},
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    grid::CellMetrics,
};

use super::{Error, Exporter};
use crate::{
    canvas::{Cell, Connector, GridCanvas, Label},
    config::StyleConfig,
};

const FONT_FAMILY: &str = "Arial, sans-serif";
const MARGIN: f32 = 20.0;
const TEXT_INSET: f32 = 4.0;
const NAME_FONT_SIZE: f32 = 12.0;
const LABEL_FONT_SIZE: f32 = 10.0;

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Parses the style and returns a ready exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] for an unparsable color or connector style.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        let line_color = style.line_color().map_err(Error::Style)?;
        let connector_style = style.connector_style().map_err(Error::Style)?;

        Ok(Svg {
            metrics: style.cell_metrics(),
            background: style.background_color().map_err(Error::Style)?,
            winner: style.winner_color().map_err(Error::Style)?,
            bronze: style.bronze_color().map_err(Error::Style)?,
            qualified: style.qualified_color().map_err(Error::Style)?,
            slot_stroke: StrokeDefinition::solid(line_color, 1.0),
            connector_stroke: StrokeDefinition::solid(line_color, 1.0)
                .with_style(connector_style)
                .with_width(style.connector_width()),
        })
    }
}

/// SVG exporter for grid canvases.
#[derive(Debug)]
pub struct Svg {
    metrics: CellMetrics,
    background: Option<Color>,
    winner: Color,
    bronze: Color,
    qualified: Color,
    slot_stroke: StrokeDefinition,
    connector_stroke: StrokeDefinition,
}

impl Svg {
    /// Pixel size of the document for a canvas reaching `(columns, rows)`.
    pub fn document_size(&self, extent: (u32, u32)) -> (f32, f32) {
        let (columns, rows) = extent;
        let corner = self.metrics.cell(columns, rows);
        (
            MARGIN.mul_add(2.0, corner.max_x()),
            MARGIN.mul_add(2.0, corner.max_y()),
        )
    }

    /// Renders the canvas to an SVG document.
    pub fn render_canvas(&self, canvas: &GridCanvas) -> Document {
        let (width, height) = self.document_size(canvas.extent());

        let mut output = LayeredOutput::new();
        if let Some(background) = &self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background);
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        for cell in canvas.cells() {
            output.merge(self.render_cell(cell));
        }
        for connector in canvas.connectors() {
            output.merge(self.render_connector(connector));
        }
        for label in canvas.labels() {
            output.merge(self.render_label(label));
        }

        let group = svg_element::Group::new()
            .set("transform", format!("translate({MARGIN}, {MARGIN})"));
        let group = output
            .render()
            .into_iter()
            .fold(group, |group, node| group.add(node));

        debug!(width = width, height = height; "SVG document rendered");

        Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(group)
    }

    fn render_cell(&self, cell: &Cell) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let rect = self.metrics.cell(cell.column(), cell.row());

        let underline = svg_element::Line::new()
            .set("x1", rect.x())
            .set("y1", rect.max_y())
            .set("x2", rect.max_x())
            .set("y2", rect.max_y());
        let underline = apply_stroke!(underline, &self.slot_stroke);
        output.add_to_layer(RenderLayer::Slot, Box::new(underline));

        if let Some(content) = cell.content() {
            let mut text = svg_element::Text::new(content.as_str())
                .set("x", rect.x() + TEXT_INSET)
                .set("y", rect.max_y() - TEXT_INSET)
                .set("font-family", FONT_FAMILY)
                .set("font-size", NAME_FONT_SIZE);
            if let CellContent::Formula(_) = content {
                text = text.set("font-style", "italic");
            }
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        output
    }

    fn render_connector(&self, connector: &Connector) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let span = self.metrics.span(connector.column(), connector.rows());

        // Starts at the underline of the row above the span.
        let line = svg_element::Line::new()
            .set("x1", span.max_x())
            .set("y1", span.y())
            .set("x2", span.max_x())
            .set("y2", span.max_y());
        let line = apply_stroke!(line, &self.connector_stroke);
        output.add_to_layer(RenderLayer::Connector, Box::new(line));

        output
    }

    fn render_label(&self, label: &Label) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let rect = self.metrics.cell(label.column(), label.row());

        let highlight = match label.label() {
            MiddleLabel::MatchNumber(_) => None,
            MiddleLabel::Winner => Some(&self.winner),
            MiddleLabel::Bronze => Some(&self.bronze),
            MiddleLabel::Qualified => Some(&self.qualified),
        };
        if let Some(fill) = highlight {
            let background = svg_element::Rectangle::new()
                .set("x", rect.x())
                .set("y", rect.y())
                .set("width", rect.width())
                .set("height", rect.height())
                .set("fill", fill)
                .set("fill-opacity", fill.alpha());
            output.add_to_layer(RenderLayer::Highlight, Box::new(background));
        }

        let text = svg_element::Text::new(label.label().to_string())
            .set("x", rect.center_x())
            .set("y", rect.y() + rect.height() / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", LABEL_FONT_SIZE)
            .set("font-weight", "bold");
        output.add_to_layer(RenderLayer::Text, Box::new(text));

        output
    }
}

impl Exporter for Svg {
    fn export_canvas(&mut self, canvas: &GridCanvas) -> Result<String, Error> {
        if canvas.extent() == (0, 0) {
            return Err(Error::Render("canvas has nothing drawn on it".to_string()));
        }
        Ok(self.render_canvas(canvas).to_string())
    }
}
