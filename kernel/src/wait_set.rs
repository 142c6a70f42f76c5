//! Per-card parking for Rule 1-D: a flip that targets a card controlled by
//! someone else waits here instead of failing immediately.
//!
//! One [`tokio::sync::Notify`] per contested coordinate. `release` wakes
//! every waiter currently parked on that coordinate as a group — the
//! specification asks for "wake all, one wins the lock" fairness, not FIFO;
//! the kernel's own mutex plus whichever task the scheduler resumes first
//! decides the winner when they re-run Rule 1.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Notify;

use crate::grid::Coord;

#[derive(Debug, Default)]
pub struct WaitSet {
    waiters: HashMap<Coord, Arc<Notify>>,
}

impl WaitSet {
    /// Returns the notifier for `coord`, creating one if this is the first
    /// waiter to park on it.
    pub fn notify_handle(&mut self, coord: Coord) -> Arc<Notify> {
        self.waiters.entry(coord).or_insert_with(|| Arc::new(Notify::new())).clone()
    }

    /// Wakes every waiter parked on `coord`. A coordinate with no parked
    /// waiters is a no-op; the next park on it starts with a fresh notifier.
    pub fn release(&mut self, coord: Coord) {
        if let Some(notify) = self.waiters.remove(&coord) {
            notify.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn release_wakes_parked_waiter() {
        let mut set = WaitSet::default();
        let coord = Coord::new(0, 0);
        let notify = set.notify_handle(coord);

        let notified = notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        set.release(coord);

        tokio::time::timeout(Duration::from_millis(100), notified)
            .await
            .expect("waiter should have been woken");
    }

    #[tokio::test]
    async fn release_with_no_waiters_is_a_no_op() {
        let mut set = WaitSet::default();
        set.release(Coord::new(1, 1));
    }
}
