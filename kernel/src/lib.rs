//! The concurrency-controlled game kernel for networked Memory (pairs).
//!
//! This crate is the core the specification describes: a card grid, a
//! per-player move tracker, a per-card wait/notify mechanism, a versioned
//! change feed, and the three-rule state machine that ties them together
//! under a single exclusion domain. It knows nothing about HTTP, path
//! parsing, or process bring-up — those are a transport adapter's job.

pub mod board_loader;
mod card;
mod grid;
mod kernel;
mod player;
mod version;
mod wait_set;

pub use board_loader::{BoardLoadError, load_board, parse_board};
pub use card::Card;
pub use grid::{Coord, Grid};
pub use kernel::{FLIP_PARK_TIMEOUT, Kernel, WATCH_DEFAULT_TIMEOUT};
pub use player::{PlayerMove, PlayerState};
pub use protocol::{BoardView, CardView, KernelError};
