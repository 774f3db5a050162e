//! A single named stopwatch and its lap history.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::pal::{Platform, PlatformFacade};
use crate::{ERR_POISONED_LOCK, Error, Result};

/// Whether a [`Stopwatch`] is currently measuring time.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum State {
    /// The stopwatch is not measuring time. This is the initial state.
    #[default]
    Stopped,

    /// The stopwatch is measuring time toward its next lap.
    Running,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => f.write_str("stopped"),
            Self::Running => f.write_str("running"),
        }
    }
}

/// A named stopwatch that records lap durations.
///
/// Stopwatches are created by a [`Registry`][crate::Registry], which guarantees that the
/// identifier is unique within it. The returned handle can be cloned cheaply; all clones
/// refer to the same stopwatch and can be used from any number of threads concurrently.
///
/// Two handles compare equal if and only if their identifiers are equal.
///
/// # Examples
///
/// ```
/// use stopwatches::{Registry, State};
///
/// # fn main() -> Result<(), stopwatches::Error> {
/// let registry = Registry::new();
/// let stopwatch = registry.create("parse_input")?;
///
/// stopwatch.start()?;
/// for _ in 0..3 {
///     // Measure one item per lap.
///     stopwatch.lap()?;
/// }
/// stopwatch.stop()?;
///
/// // Three explicit laps plus the final one recorded by `stop()`.
/// assert_eq!(stopwatch.lap_times().len(), 4);
/// assert_eq!(stopwatch.state(), State::Stopped);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Stopwatch {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    id: String,
    timing: Mutex<Timing>,
    platform: PlatformFacade,
}

#[derive(Debug, Default)]
struct Timing {
    phase: Phase,
    lap_times: Vec<Duration>,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Stopped,

    Running {
        // Instant from which the open lap is being measured.
        since: Instant,

        // Time already accumulated by a lap that was reopened by `start()`.
        carried: Duration,
    },
}

impl Timing {
    fn state(&self) -> State {
        match self.phase {
            Phase::Stopped => State::Stopped,
            Phase::Running { .. } => State::Running,
        }
    }

    /// Closes the open lap at `now` and opens the next one.
    ///
    /// Does nothing and returns `None` if the stopwatch is stopped.
    fn close_lap(&mut self, now: Instant) -> Option<Duration> {
        let Phase::Running { since, carried } = self.phase else {
            return None;
        };

        let lap = carried.saturating_add(now.saturating_duration_since(since));
        self.lap_times.push(lap);
        self.phase = Phase::Running {
            since: now,
            carried: Duration::ZERO,
        };

        Some(lap)
    }
}

impl Stopwatch {
    #[must_use]
    pub(crate) fn new(id: String, platform: PlatformFacade) -> Self {
        Self {
            inner: Arc::new(Inner {
                id,
                timing: Mutex::new(Timing::default()),
                platform,
            }),
        }
    }

    /// The identifier this stopwatch was created with.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The current state of the stopwatch.
    #[must_use]
    pub fn state(&self) -> State {
        self.timing().state()
    }

    /// Whether the stopwatch is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == State::Running
    }

    /// Starts measuring time.
    ///
    /// On a stopwatch without recorded laps, the first lap is measured from now. Otherwise the
    /// most recently recorded lap is removed and reopened: it keeps the time it had already
    /// accumulated and continues from now, so the interval spent stopped is not counted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the stopwatch is already running.
    pub fn start(&self) -> Result<()> {
        let mut timing = self.timing();

        if matches!(timing.phase, Phase::Running { .. }) {
            return Err(Error::invalid_state(self.id(), "start", State::Running));
        }

        let since = self.inner.platform.now();
        let carried = timing.lap_times.pop().unwrap_or_default();
        timing.phase = Phase::Running { since, carried };

        tracing::trace!(id = self.id(), ?carried, "stopwatch started");

        Ok(())
    }

    /// Records the time since the previous lap (or since starting) as a completed lap.
    ///
    /// Returns the duration of the recorded lap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the stopwatch is stopped.
    pub fn lap(&self) -> Result<Duration> {
        let mut timing = self.timing();

        let lap = timing
            .close_lap(self.inner.platform.now())
            .ok_or_else(|| Error::invalid_state(self.id(), "lap", State::Stopped))?;

        tracing::trace!(id = self.id(), ?lap, "recorded lap");

        Ok(lap)
    }

    /// Records the final open lap and stops the stopwatch.
    ///
    /// Returns the duration of the final lap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the stopwatch is already stopped.
    pub fn stop(&self) -> Result<Duration> {
        let mut timing = self.timing();

        let lap = timing
            .close_lap(self.inner.platform.now())
            .ok_or_else(|| Error::invalid_state(self.id(), "stop", State::Stopped))?;
        timing.phase = Phase::Stopped;

        tracing::trace!(id = self.id(), ?lap, "stopwatch stopped");

        Ok(lap)
    }

    /// Stops the stopwatch and discards all recorded laps.
    ///
    /// This is permitted in any state.
    pub fn reset(&self) {
        *self.timing() = Timing::default();

        tracing::trace!(id = self.id(), "stopwatch reset");
    }

    /// Returns a copy of the recorded lap durations, oldest first.
    ///
    /// The returned vector is independent of the stopwatch; modifying it has no effect on
    /// the recorded laps.
    #[must_use]
    pub fn lap_times(&self) -> Vec<Duration> {
        self.timing().lap_times.clone()
    }

    fn timing(&self) -> MutexGuard<'_, Timing> {
        self.inner.timing.lock().expect(ERR_POISONED_LOCK)
    }
}

impl PartialEq for Stopwatch {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Stopwatch {}

impl Hash for Stopwatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timing = self.timing();
        write!(
            f,
            "Stopwatch ID: {} | laptimes: {:?}",
            self.id(),
            timing.lap_times
        )
    }
}
