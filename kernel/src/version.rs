//! The kernel's monotonic change counter, for long-poll `watch`.

use std::sync::Arc;

use tokio::sync::Notify;

/// Bumped exactly once per externally visible mutation. Every bump wakes
/// everyone currently waiting in `watch`.
#[derive(Debug)]
pub struct VersionClock {
    version: u64,
    changed: Arc<Notify>,
}

impl VersionClock {
    pub fn new() -> Self {
        VersionClock {
            version: 0,
            changed: Arc::new(Notify::new()),
        }
    }

    pub fn current(&self) -> u64 {
        self.version
    }

    /// Advances the counter and wakes every parked `watch` caller.
    pub fn bump(&mut self) {
        self.version += 1;
        self.changed.notify_waiters();
    }

    /// A handle to the change notification, independent of the kernel lock
    /// so a caller can hold it across an `.await` after releasing that lock.
    pub fn change_handle(&self) -> Arc<Notify> {
        self.changed.clone()
    }
}

impl Default for VersionClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_is_monotonic() {
        let mut clock = VersionClock::new();
        assert_eq!(clock.current(), 0);
        clock.bump();
        clock.bump();
        assert_eq!(clock.current(), 2);
    }
}
