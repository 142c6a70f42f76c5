//! Dense, bounds-checked storage for the board.

use crate::card::Card;

/// A board coordinate. Row and column are both zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

/// A fixed-size rectangular array of cards, addressed by (row, col).
pub struct Grid {
    rows: usize,
    cols: usize,
    cards: Vec<Card>,
}

impl Grid {
    /// Builds a grid from row-major labels. Every label becomes one
    /// face-down card; `labels` must be rectangular (checked by the caller
    /// via [`crate::board_loader`]).
    pub fn new(labels: Vec<Vec<String>>) -> Self {
        let rows = labels.len();
        let cols = labels.first().map_or(0, Vec::len);
        let cards = labels
            .into_iter()
            .flat_map(|row| row.into_iter().map(Card::new))
            .collect();
        Grid { rows, cols, cards }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    pub fn get(&self, coord: Coord) -> Option<&Card> {
        self.in_bounds(coord).then(|| &self.cards[self.index(coord)])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Card> {
        if !self.in_bounds(coord) {
            return None;
        }
        let idx = self.index(coord);
        Some(&mut self.cards[idx])
    }

    /// Row-major iteration over every card, for rendering and bulk map.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(rows: usize, cols: usize) -> Vec<Vec<String>> {
        (0..rows)
            .map(|r| (0..cols).map(|c| format!("{r}-{c}")).collect())
            .collect()
    }

    #[test]
    fn bounds_checked() {
        let grid = Grid::new(labels(2, 3));
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert!(grid.in_bounds(Coord::new(1, 2)));
        assert!(!grid.in_bounds(Coord::new(2, 0)));
        assert!(!grid.in_bounds(Coord::new(0, 3)));
        assert!(grid.get(Coord::new(2, 0)).is_none());
    }

    #[test]
    fn row_major_layout() {
        let grid = Grid::new(labels(2, 2));
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap().label, "0-0");
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap().label, "1-1");
        assert_eq!(grid.cards()[2].label, "1-0");
    }
}
