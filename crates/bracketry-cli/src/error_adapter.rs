//! Error adapter for converting BracketError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use bracketry::BracketError;

/// Adapter for a [`BracketError`].
///
/// Bracket errors carry no source locations, so the adapter only supplies a
/// diagnostic code and, for input errors, a hint on how to fix the input.
pub struct ErrorAdapter<'a>(pub &'a BracketError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BracketError::InvalidParticipantCount { .. } => "bracketry::participants",
            BracketError::InvalidQualificationTarget { .. } => "bracketry::qualification",
            BracketError::InvalidStartRow(_) => "bracketry::start_row",
            BracketError::UnsupportedVariant(_) => "bracketry::variant",
            BracketError::MissingSemifinalMatch { .. } | BracketError::MissingChildMatch { .. } => {
                "bracketry::internal"
            }
            BracketError::Config(_) => "bracketry::config",
            BracketError::Io(_) => "bracketry::io",
            BracketError::Export(_) => "bracketry::export",
            BracketError::State(_) => "bracketry::state",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BracketError::InvalidParticipantCount { .. } => {
                "list one participant per line; the list ends at the first blank line"
            }
            BracketError::InvalidQualificationTarget { .. } => {
                "use 1, 2, 4, 8, ... up to half the number of participants"
            }
            BracketError::InvalidStartRow(_) => {
                "grid rows are numbered from 1; pick a start row nearer the top of the grid"
            }
            BracketError::MissingSemifinalMatch { .. } | BracketError::MissingChildMatch { .. } => {
                "the bracket planner lost track of a match; please report this"
            }
            BracketError::State(_) => {
                "the state file is not a canvas written by bracketry; remove it to start over"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`BracketError`] into a list of reportable errors.
pub fn to_reportables(err: &BracketError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}
