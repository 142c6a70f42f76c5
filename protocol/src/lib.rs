//! Wire-level types shared between the game kernel and its transport.
//!
//! The protocol is a small text format (see [`board`]) and a closed set of
//! rule-failure reasons (see [`error`]). Neither module knows anything about
//! HTTP, sockets, or any particular transport — they describe only what goes
//! out on the wire, so the kernel and the transport adapter agree on it
//! without either depending on the other's internals.

pub mod board;
pub mod error;

pub use board::{BoardView, CardView};
pub use error::KernelError;
