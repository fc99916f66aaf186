//! Error types for Bracketry operations.
//!
//! This module provides the main error type [`BracketError`]. Input errors
//! (participant count, qualification target, start row, configuration) are
//! always raised before anything is drawn. Lookup failures inside the
//! planner mean the build is internally inconsistent and abort it.

use std::io;

use thiserror::Error;

use crate::seed::{MAX_PARTICIPANTS, MIN_PARTICIPANTS};

/// The main error type for Bracketry operations.
#[derive(Debug, Error)]
pub enum BracketError {
    #[error(
        "a bracket needs between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS} participants, got {count}"
    )]
    InvalidParticipantCount { count: usize },

    #[error(
        "cannot qualify {qualified} of {participants} participants: the target must be a power of two no larger than half the field"
    )]
    InvalidQualificationTarget { qualified: u32, participants: usize },

    #[error("start row {0} is outside the grid: it must be at least 1 and leave room for the whole bracket")]
    InvalidStartRow(u32),

    #[error("no semifinal match recorded in column {column}")]
    MissingSemifinalMatch { column: u32 },

    #[error("no match recorded at column {column}, position {index_in_column}")]
    MissingChildMatch { column: u32, index_in_column: u32 },

    #[error("bracket variant `{0}` is not supported")]
    UnsupportedVariant(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("State error: {0}")]
    State(String),
}

impl From<crate::export::Error> for BracketError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl BracketError {
    /// Returns `true` for errors caused by the caller's input rather than by
    /// an inconsistency inside the planner.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParticipantCount { .. }
                | Self::InvalidQualificationTarget { .. }
                | Self::InvalidStartRow(_)
                | Self::UnsupportedVariant(_)
                | Self::Config(_)
        )
    }
}
