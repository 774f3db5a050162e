//! Named, thread-safe stopwatches that record lap durations.
//!
//! This package provides independent timers identified by string keys, intended for test
//! harnesses and instrumentation code that needs to measure intervals from multiple threads
//! without arranging any synchronization of its own.
//!
//! The core functionality includes:
//! - [`Registry`] - Creates stopwatches under unique identifiers and lists all created stopwatches
//! - [`Stopwatch`] - A single stopwatch with its own state and lap history
//! - [`State`] - Whether a stopwatch is currently running
//! - [`Error`] - Describes why a registry or stopwatch call was rejected
//!
//! # Simple Usage
//!
//! ```
//! use stopwatches::Registry;
//!
//! # fn main() -> Result<(), stopwatches::Error> {
//! let registry = Registry::new();
//! let stopwatch = registry.create("request_handling")?;
//!
//! stopwatch.start()?;
//! // Do some work...
//! stopwatch.lap()?;
//! // Do some more work...
//! stopwatch.stop()?;
//!
//! assert_eq!(stopwatch.lap_times().len(), 2);
//! println!("{stopwatch}");
//! # Ok(())
//! # }
//! ```
//!
//! # Pausing
//!
//! Stopping a stopwatch and starting it again acts as a pause. The most recent lap is reopened
//! and continues to accumulate time, while the interval spent stopped is not counted.
//!
//! ```
//! use stopwatches::Registry;
//!
//! # fn main() -> Result<(), stopwatches::Error> {
//! let registry = Registry::new();
//! let stopwatch = registry.create("paused_work")?;
//!
//! stopwatch.start()?;
//! stopwatch.stop()?;
//! // Irrelevant work here is not measured.
//! stopwatch.start()?;
//! stopwatch.lap()?;
//!
//! // The lap opened by the first `start()` was resumed, not duplicated.
//! assert_eq!(stopwatch.lap_times().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! Every [`Stopwatch`] guards its state with its own lock, so handles can be cloned and shared
//! between threads freely. Operations on different stopwatches never contend with each other.
//!
//! A [`Registry`] is typically created once per test context and passed by reference to the code
//! that needs it. For conventional process-wide use, [`Registry::global()`] returns a lazily
//! created shared instance.

mod error;
mod pal;
mod registry;
mod stopwatch;

pub use error::Error;
pub(crate) use error::Result;
pub use registry::Registry;
pub use stopwatch::{State, Stopwatch};

pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - stopwatch state cannot be trusted after a panic";
