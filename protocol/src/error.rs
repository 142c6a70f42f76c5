//! The rule-failure reasons the kernel can surface to a caller.
//!
//! These are the only ways a `flip` can fail; a transport maps them to
//! whatever status code and diagnostic string its wire format wants. The
//! `Display` impl below is exactly the short reason string the text
//! protocol's error line uses.

use thiserror::Error;

/// A rule failure or malformed request surfaced by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KernelError {
    /// (row, col) outside the grid.
    #[error("bad coordinate")]
    BadCoord,
    /// Target card is removed (Rules 1-A, 2-A).
    #[error("gone")]
    Gone,
    /// First flip targets a card the caller already controls (Rule 1-E).
    #[error("self-controlled")]
    SelfControlled,
    /// Second flip targets a card controlled by another player (Rule 2-B).
    #[error("controlled")]
    Controlled,
    /// Second flip equals the first coordinate.
    #[error("same-card")]
    SameCard,
    /// Rule 1-D wait exceeded the deadline.
    #[error("timeout")]
    Timeout,
}
