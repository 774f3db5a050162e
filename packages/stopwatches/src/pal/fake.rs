//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// Time starts at an arbitrary fixed instant and only moves when a test advances it.
/// Multiple clones of the same `FakePlatform` share the same elapsed time, allowing tests
/// to move time forward after handing the platform to a registry.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    /// Creates a new fake platform whose clock is frozen at its origin.
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the fake clock forward by the given amount.
    ///
    /// This affects all clones of this platform.
    pub(crate) fn advance(&self, by: Duration) {
        let mut elapsed = self
            .elapsed
            .lock()
            .expect("FakePlatform state lock should not be poisoned");
        *elapsed = elapsed
            .checked_add(by)
            .expect("fake time never advances far enough to overflow");
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Instant {
        let elapsed = *self
            .elapsed
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        self.origin
            .checked_add(elapsed)
            .expect("fake time never advances far enough to overflow")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn time_is_frozen_until_advanced() {
        let platform = FakePlatform::new();

        assert_eq!(platform.now(), platform.now());
    }

    #[test]
    fn advance_accumulates() {
        let platform = FakePlatform::new();
        let start = platform.now();

        platform.advance(Duration::from_millis(100));
        platform.advance(Duration::from_millis(50));

        assert_eq!(
            platform.now().duration_since(start),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();
        let start = platform2.now();

        platform1.advance(Duration::from_millis(100));

        assert_eq!(
            platform2.now().duration_since(start),
            Duration::from_millis(100)
        );
    }
}
