//! Replays a finished [`BracketTree`] onto a [`Canvas`].
//!
//! Painting is the only step that mutates a canvas, and it runs only after
//! the whole tree has been planned.

use log::{debug, trace};

use bracketry_core::canvas::{Canvas, CellContent, MiddleLabel};

use crate::structure::{BracketTree, Match, MatchRole};

/// Issues canvas commands for every match and bye of a tree.
#[derive(Debug, Clone)]
pub struct Painter<'a> {
    region_prefix: &'a str,
}

impl<'a> Painter<'a> {
    /// Creates a painter registering regions as `<region_prefix><match_index>`.
    pub fn new(region_prefix: &'a str) -> Self {
        Self { region_prefix }
    }

    /// Draws every match in creation order, then writes the bye participants
    /// into their main-round slots.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C, tree: &BracketTree) {
        for bracket_match in tree.matches() {
            self.paint_match(canvas, bracket_match);
        }

        for bye in tree.byes() {
            let content = bye.participant().content();
            canvas.place_match(bye.slot(), Some(&content));
        }

        debug!(
            matches = tree.match_count(),
            byes = tree.byes().len();
            "Painted bracket"
        );
    }

    fn paint_match<C: Canvas + ?Sized>(&self, canvas: &mut C, bracket_match: &Match) {
        let top = bracket_match.top_entrant().map(|p| p.content());
        let bottom = bracket_match.bottom_entrant().map(|p| p.content());
        canvas.place_match(bracket_match.top(), top.as_ref());
        canvas.place_match(bracket_match.bottom(), bottom.as_ref());

        if let Some(connector) = bracket_match.connector() {
            canvas.draw_connector(connector, bracket_match.column());
        }
        canvas.set_middle_label(
            bracket_match.middle(),
            &MiddleLabel::MatchNumber(bracket_match.match_index()),
        );

        let advance = bracket_match.advance_slot();
        canvas.place_match(advance, None::<&CellContent>);
        if let Some(marker) = Self::marker(bracket_match.role()) {
            canvas.set_middle_label(advance.offset_rows(1), &marker);
        }

        let name = format!("{}{}", self.region_prefix, bracket_match.match_index());
        canvas.register_named_region(&name, bracket_match.record());

        trace!(region = name, role:? = bracket_match.role(); "Painted match");
    }

    fn marker(role: MatchRole) -> Option<MiddleLabel> {
        match role {
            MatchRole::Regular => None,
            MatchRole::Final => Some(MiddleLabel::Winner),
            MatchRole::ThirdPlace => Some(MiddleLabel::Bronze),
            MatchRole::Qualifier => Some(MiddleLabel::Qualified),
        }
    }
}
