//! Real platform implementation using the operating system's monotonic clock.

use std::time::Instant;

use crate::pal::abstractions::Platform;

/// Real implementation of the platform abstraction, backed by [`Instant::now()`].
#[derive(Debug, Clone)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
