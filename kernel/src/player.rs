//! Lazily-materialized per-player bookkeeping.

use std::collections::{HashMap, HashSet};

use crate::grid::Coord;

/// A player's attempt at a pair: first flip, then second flip.
#[derive(Debug, Clone, Default)]
pub struct PlayerMove {
    pub first: Option<Coord>,
    pub second: Option<Coord>,
    pub was_match: bool,
    pub completed: bool,
}

impl PlayerMove {
    /// True when the next `flip` for this player should begin a new move
    /// (and, first, run deferred cleanup of whatever this move left behind).
    pub fn needs_new_move(&self) -> bool {
        self.completed || self.first.is_none()
    }
}

/// Everything the kernel tracks for one player.
#[derive(Debug, Default)]
pub struct PlayerState {
    pub controlled: HashSet<Coord>,
    pub current_move: PlayerMove,
}

/// Keyed by opaque player identifier; entries are created on first reference.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<String, PlayerState>,
}

impl PlayerRegistry {
    /// Returns this player's state, materializing an empty one on first use.
    pub fn entry(&mut self, player: &str) -> &mut PlayerState {
        self.players.entry(player.to_string()).or_default()
    }
}
