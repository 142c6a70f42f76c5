//! The three-rule state machine: first flip, second flip, deferred cleanup.
//!
//! Every public method takes the single kernel-wide lock for its whole
//! critical section except at the two documented suspension points (parking
//! in Rule 1-D, and the transform call inside [`Kernel::map`]). Holding the
//! lock precludes any other kernel operation from interleaving.

use std::future::Future;
use std::time::{Duration, Instant};

use protocol::{BoardView, CardView, KernelError};
use tokio::sync::Mutex;

use crate::grid::{Coord, Grid};
use crate::player::PlayerMove;
use crate::player::PlayerRegistry;
use crate::version::VersionClock;
use crate::wait_set::WaitSet;

/// Default deadline for a Rule 1-D park (§5: "a fixed per-call timeout").
pub const FLIP_PARK_TIMEOUT: Duration = Duration::from_secs(30);
/// Default `watch` deadline when the caller does not supply one.
pub const WATCH_DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

struct KernelState {
    grid: Grid,
    players: PlayerRegistry,
    wait_set: WaitSet,
    version: VersionClock,
}

/// The serialized game kernel. Cheap to clone behind an `Arc` — all state
/// lives behind the single internal mutex.
pub struct Kernel {
    state: Mutex<KernelState>,
}

enum Rule1Outcome {
    Applied,
    Failed(KernelError),
    Park,
}

impl Kernel {
    pub fn new(labels: Vec<Vec<String>>) -> Self {
        Kernel {
            state: Mutex::new(KernelState {
                grid: Grid::new(labels),
                players: PlayerRegistry::default(),
                wait_set: WaitSet::default(),
                version: VersionClock::new(),
            }),
        }
    }

    /// Serialized board from `player`'s perspective. Never mutates state.
    pub async fn look(&self, player: &str) -> BoardView {
        tracing::debug!(player, "look");
        let guard = self.state.lock().await;
        render_board(&guard.grid, player)
    }

    /// Blocks until the version advances past its value at entry, or until
    /// `timeout` elapses; either way returns the current board.
    pub async fn watch(&self, player: &str, timeout: Duration) -> BoardView {
        let guard = self.state.lock().await;
        let notify = guard.version.change_handle();
        // Register as a waiter *before* releasing the lock: a bump can only
        // happen while holding this same lock, so nothing can slip in
        // between our snapshot and our registration.
        let notified = notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        drop(guard);

        let _ = tokio::time::timeout(timeout, notified).await;
        tracing::debug!(player, "watch woke");

        let guard = self.state.lock().await;
        render_board(&guard.grid, player)
    }

    /// Flips the card at `(row, col)` for `player`. See the module docs and
    /// the specification's Rules 1-3 for the full state machine.
    pub async fn flip(&self, player: &str, row: usize, col: usize) -> Result<BoardView, KernelError> {
        tracing::debug!(player, row, col, "flip");
        let coord = Coord::new(row, col);
        let deadline = Instant::now() + FLIP_PARK_TIMEOUT;
        let mut began_new_move = false;

        loop {
            let mut guard = self.state.lock().await;

            if !guard.grid.in_bounds(coord) {
                return Err(KernelError::BadCoord);
            }

            if !began_new_move {
                let needs_new = guard.players.entry(player).current_move.needs_new_move();
                if needs_new {
                    cleanup_previous_move(&mut guard, player);
                }
                began_new_move = true;
                if !needs_new {
                    let result = apply_rule2(&mut guard, player, coord);
                    if let Err(err) = &result {
                        tracing::warn!(player, row, col, %err, "flip rejected");
                    }
                    return result;
                }
            }

            match apply_rule1(&mut guard, player, coord) {
                Rule1Outcome::Applied => {
                    guard.version.bump();
                    tracing::debug!(player, row, col, "flip applied");
                    return Ok(render_board(&guard.grid, player));
                }
                Rule1Outcome::Failed(err) => {
                    tracing::warn!(player, row, col, %err, "flip rejected");
                    return Err(err);
                }
                Rule1Outcome::Park => {
                    let notify = guard.wait_set.notify_handle(coord);
                    let notified = notify.notified();
                    tokio::pin!(notified);
                    notified.as_mut().enable();
                    drop(guard);

                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        tracing::warn!(player, row, col, "flip timed out waiting for card");
                        return Err(KernelError::Timeout);
                    }
                    if tokio::time::timeout(remaining, notified).await.is_err() {
                        tracing::warn!(player, row, col, "flip timed out waiting for card");
                        return Err(KernelError::Timeout);
                    }
                    // Woken: loop back and re-run Rule 1 from case 1-A. The
                    // card may have changed underneath us — never trust the
                    // pre-park snapshot.
                }
            }
        }
    }

    /// Rewrites every non-removed card's label via `transform`, atomically
    /// with respect to match checks. The kernel lock is held across the
    /// `transform` call itself, so `transform` may suspend (await external
    /// work) without letting any flip interleave.
    pub async fn map<F, Fut>(&self, player: &str, transform: F) -> BoardView
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = String>,
    {
        tracing::debug!(player, "map");
        let mut guard = self.state.lock().await;
        let count = guard.grid.cards().len();
        for idx in 0..count {
            let removed = guard.grid.cards()[idx].removed;
            if removed {
                continue;
            }
            let old_label = guard.grid.cards()[idx].label.clone();
            let new_label = transform(old_label).await;
            guard.grid.cards_mut()[idx].label = new_label;
        }
        guard.version.bump();
        render_board(&guard.grid, player)
    }
}

/// Rule 1: first card of a move. Mutates state only on 1-B/1-C; leaves it
/// untouched on 1-A/1-E, and the caller parks (without mutation) on 1-D.
fn apply_rule1(state: &mut KernelState, player: &str, coord: Coord) -> Rule1Outcome {
    let card = state.grid.get(coord).expect("bounds already checked");

    if card.removed {
        return Rule1Outcome::Failed(KernelError::Gone); // 1-A
    }
    if card.is_controlled_by(player) {
        return Rule1Outcome::Failed(KernelError::SelfControlled); // 1-E
    }
    if card.face_up && card.controller.is_some() {
        return Rule1Outcome::Park; // 1-D
    }

    // 1-B (!face_up) or 1-C (face_up, uncontrolled): claim it.
    let card = state.grid.get_mut(coord).expect("bounds already checked");
    card.face_up = true;
    card.controller = Some(player.to_string());

    let player_state = state.players.entry(player);
    player_state.controlled.insert(coord);
    player_state.current_move = PlayerMove {
        first: Some(coord),
        second: None,
        was_match: false,
        completed: false,
    };

    Rule1Outcome::Applied
}

/// Rule 2: second card of a move. Always resolves the move (completes it,
/// one way or another) before returning.
fn apply_rule2(state: &mut KernelState, player: &str, coord: Coord) -> Result<BoardView, KernelError> {
    let first = state
        .players
        .entry(player)
        .current_move
        .first
        .expect("rule 2 only runs once rule 1 set a first card");

    if coord == first {
        relinquish(state, player, first);
        return Err(KernelError::SameCard);
    }

    let second_card = state.grid.get(coord).expect("bounds already checked");

    if second_card.removed {
        relinquish(state, player, first);
        return Err(KernelError::Gone); // 2-A
    }
    if second_card.face_up
        && let Some(controller) = &second_card.controller
        && controller != player
    {
        relinquish(state, player, first);
        return Err(KernelError::Controlled); // 2-B
    }

    if !state.grid.get(coord).unwrap().face_up {
        state.grid.get_mut(coord).unwrap().face_up = true; // 2-C
    }

    let first_label = state.grid.get(first).unwrap().label.clone();
    let second_label = state.grid.get(coord).unwrap().label.clone();

    if first_label == second_label {
        // 2-D: match.
        let second_card = state.grid.get_mut(coord).unwrap();
        second_card.controller = Some(player.to_string());
        let player_state = state.players.entry(player);
        player_state.controlled.insert(coord);
        player_state.current_move.second = Some(coord);
        player_state.current_move.was_match = true;
        player_state.current_move.completed = true;
        state.version.bump();
        Ok(render_board(&state.grid, player))
    } else {
        // 2-E: mismatch. Both cards stay face-up but relinquish control.
        if let Some(card) = state.grid.get_mut(first) {
            card.controller = None;
        }
        if let Some(card) = state.grid.get_mut(coord) {
            card.controller = None;
        }
        let player_state = state.players.entry(player);
        player_state.controlled.remove(&first);
        player_state.controlled.remove(&coord);
        player_state.current_move.second = Some(coord);
        player_state.current_move.was_match = false;
        player_state.current_move.completed = true;
        state.wait_set.release(first);
        state.wait_set.release(coord);
        state.version.bump();
        Ok(render_board(&state.grid, player))
    }
}

/// Clears `f`'s controller, wakes its waiters, and completes the move as a
/// no-match with only the first card present — used by the same-card, 2-A,
/// and 2-B failure paths, where the second coordinate never became part of
/// a legitimate pair.
fn relinquish(state: &mut KernelState, player: &str, f: Coord) {
    if let Some(card) = state.grid.get_mut(f) {
        card.controller = None;
    }
    let player_state = state.players.entry(player);
    player_state.controlled.remove(&f);
    player_state.current_move = PlayerMove {
        first: Some(f),
        second: None,
        was_match: false,
        completed: true,
    };
    state.wait_set.release(f);
}

/// Rule 3: deferred cleanup of the player's previous move, run just before
/// Rule 1 begins a new one.
fn cleanup_previous_move(state: &mut KernelState, player: &str) {
    let mv = state.players.entry(player).current_move.clone();
    if !mv.completed {
        state.players.entry(player).current_move = PlayerMove::default();
        return;
    }

    if mv.was_match {
        let first = mv.first.expect("a completed match always has both cards");
        let second = mv.second.expect("a completed match always has both cards");
        let still_held = state.grid.get(first).is_some_and(|c| c.is_controlled_by(player))
            && state.grid.get(second).is_some_and(|c| c.is_controlled_by(player));
        if still_held {
            for coord in [first, second] {
                if let Some(card) = state.grid.get_mut(coord) {
                    card.removed = true;
                    card.face_up = false;
                    card.controller = None;
                }
                state.wait_set.release(coord);
            }
            let player_state = state.players.entry(player);
            player_state.controlled.remove(&first);
            player_state.controlled.remove(&second);
            state.version.bump();
        }
    } else {
        let mut changed = false;
        for coord in [mv.first, mv.second].into_iter().flatten() {
            if let Some(card) = state.grid.get_mut(coord)
                && card.face_up
                && card.controller.is_none()
                && !card.removed
            {
                card.face_up = false;
                changed = true;
            }
        }
        if changed {
            state.version.bump();
        }
    }

    state.players.entry(player).current_move = PlayerMove::default();
}

fn render_board(grid: &Grid, player: &str) -> BoardView {
    let cards = grid
        .cards()
        .iter()
        .map(|card| {
            if card.removed {
                CardView::Removed
            } else if !card.face_up {
                CardView::Down
            } else if card.is_controlled_by(player) {
                CardView::Mine(card.label.clone())
            } else {
                CardView::Theirs(card.label.clone())
            }
        })
        .collect();

    BoardView {
        rows: grid.rows(),
        cols: grid.cols(),
        cards,
    }
}
