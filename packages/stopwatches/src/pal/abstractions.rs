//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Instant;

/// Provides the current time to stopwatches.
///
/// Implementations must be monotonic: a later call never returns an earlier instant.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current instant.
    fn now(&self) -> Instant;
}
