//! Z-ordering for the SVG rendering of a bracket.
//!
//! Marker highlights must sit under the text printed on them, and connector
//! lines under the endpoint underlines they meet. The exporter tags every
//! element with a [`RenderLayer`] and collects them in a [`LayeredOutput`],
//! which emits one `<g data-layer="...">` group per layer, lowest first.
//!
//! ```
//! # use bracketry_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("WINNER")));
//! output.add_to_layer(RenderLayer::Highlight, Box::new(Rectangle::new()));
//!
//! let groups = output.render();
//! assert!(groups[0].to_string().contains("highlight"));
//! assert!(groups[1].to_string().contains("WINNER"));
//! ```

use std::collections::BTreeMap;

use svg::node::element::Group;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Drawing layers of a bracket, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Page fill
    Background,
    /// Fills behind `WINNER`, `BRONZE` and `QUALIFIED`
    Highlight,
    /// Vertical lines joining a match's endpoints
    Connector,
    /// Endpoint underlines
    Slot,
    /// Names, match numbers and markers
    Text,
}

impl RenderLayer {
    /// Value of the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Highlight => "highlight",
            Self::Connector => "connector",
            Self::Slot => "slot",
            Self::Text => "text",
        }
    }
}

/// SVG nodes bucketed by layer; each bucket keeps insertion order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends every node of `other` after this output's nodes of the same layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// One group per used layer, bottom to top.
    pub fn render(self) -> Vec<SvgNode> {
        self.layers
            .into_iter()
            .map(|(layer, nodes)| {
                let group = Group::new().set("data-layer", layer.name());
                let group = nodes.into_iter().fold(group, |group, node| group.add(node));
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
