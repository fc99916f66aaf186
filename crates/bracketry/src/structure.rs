//! The match tree and the collections that hold it.
//!
//! - [`Match`] - One drawn match with its grid slots
//! - [`BracketRegistry`] - Append-only match store keyed by column position
//! - [`BracketReader`] - Rebuilds a registry from persisted named regions
//! - [`BracketTree`] - The outcome of a build: registry, byes, final and
//!   third-place references

mod bracket_match;
mod reader;
mod registry;
mod tree;

pub use bracket_match::{Bye, Match, MatchKey, MatchRole, Participant};
pub use reader::BracketReader;
pub use registry::BracketRegistry;
pub use tree::BracketTree;
