//! Export of drawn brackets.
//!
//! ```text
//! Participants
//!     ↓ build
//! BracketTree
//!     ↓ paint
//! GridCanvas
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`BracketError::Export`](crate::BracketError::Export) at the crate
//! boundary.

pub mod svg;

use crate::canvas::GridCanvas;

/// Abstraction for canvas export backends.
pub trait Exporter {
    /// Renders the whole canvas to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] if the configured style cannot be applied, or
    /// [`Error::Render`] if the canvas cannot be converted.
    fn export_canvas(&mut self, canvas: &GridCanvas) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A style value (usually a color) could not be parsed.
    Style(String),
    /// A rendering failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Style(msg) => write!(f, "Style error: {msg}"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
