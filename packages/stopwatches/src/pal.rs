//! Platform abstraction layer for reading the current time.
//!
//! This module allows switching between the real monotonic clock and a fake clock
//! whose time is advanced manually, so lap arithmetic can be tested deterministically.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
