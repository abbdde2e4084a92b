//! Per-connection request tracking.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Number of requests currently being handled on one connection.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    count: Arc<AtomicUsize>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started. It counts until the guard is dropped.
    pub fn track(&self) -> RequestGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        RequestGuard {
            count: self.count.clone(),
        }
    }

    pub fn active(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// True when no request is being handled.
    pub fn is_idle(&self) -> bool {
        self.active() == 0
    }
}

/// Keeps one request counted while alive.
#[derive(Debug)]
pub struct RequestGuard {
    count: Arc<AtomicUsize>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_counts() {
        let in_flight = InFlight::new();
        assert!(in_flight.is_idle());

        let first = in_flight.track();
        let second = in_flight.clone().track();
        assert_eq!(in_flight.active(), 2);

        drop(first);
        assert_eq!(in_flight.active(), 1);

        drop(second);
        assert!(in_flight.is_idle());
    }
}
