//! A single cell of the grid.

/// One card: a label plus its visibility/control state.
///
/// Invariants (enforced by the kernel, never by `Card` itself):
/// - `removed` implies `!face_up` and `controller == None`.
/// - `controller != None` implies `face_up` and `!removed`.
/// - `label` is immutable except via the bulk map operation, which never
///   runs concurrently with flips.
#[derive(Debug, Clone)]
pub struct Card {
    pub label: String,
    pub face_up: bool,
    pub controller: Option<String>,
    pub removed: bool,
}

impl Card {
    /// A freshly dealt, face-down card.
    pub fn new(label: String) -> Self {
        Card {
            label,
            face_up: false,
            controller: None,
            removed: false,
        }
    }

    pub fn is_controlled_by(&self, player: &str) -> bool {
        self.controller.as_deref() == Some(player)
    }
}
