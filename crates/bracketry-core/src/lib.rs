//! Bracketry Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Bracketry layout
//! engine and its rendering back ends. It includes:
//!
//! - **Grid**: Integer row/column coordinates for bracket slots ([`grid`] module)
//! - **Canvas**: The abstract drawing surface a bracket is painted onto ([`canvas`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Layered SVG output and stroke styling ([`draw`] module)

pub mod canvas;
pub mod color;
pub mod draw;
pub mod grid;
