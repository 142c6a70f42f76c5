//! The board serialization used by `look`, `flip`, and `watch` responses.
//!
//! First line is `<rows>x<cols>`, followed by `rows * cols` lines in
//! row-major order, one per card. A caller learns the label only when
//! legal to see, and can distinguish its own holdings from everyone else's.

use std::fmt;

/// A single card as seen from one particular player's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardView {
    /// The card has been removed from play.
    Removed,
    /// Face-down, label hidden.
    Down,
    /// Face-up and controlled by the caller.
    Mine(String),
    /// Face-up, controlled by someone else or uncontrolled.
    Theirs(String),
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardView::Removed => write!(f, "none"),
            CardView::Down => write!(f, "down"),
            CardView::Mine(label) => write!(f, "my {label}"),
            CardView::Theirs(label) => write!(f, "up {label}"),
        }
    }
}

/// A complete board snapshot, already rendered from one player's viewpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries.
    pub cards: Vec<CardView>,
}

impl BoardView {
    /// Renders the header-plus-lines text format the wire protocol sends.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(8 + self.cards.len() * 6);
        out.push_str(&self.rows.to_string());
        out.push('x');
        out.push_str(&self.cols.to_string());
        out.push('\n');
        for card in &self.cards {
            out.push_str(&card.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_rows() {
        let board = BoardView {
            rows: 2,
            cols: 2,
            cards: vec![
                CardView::Mine("A".into()),
                CardView::Down,
                CardView::Theirs("B".into()),
                CardView::Removed,
            ],
        };
        assert_eq!(board.render(), "2x2\nmy A\ndown\nup B\nnone\n");
    }
}
