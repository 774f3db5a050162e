use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{LazyLock, Mutex};

use crate::pal::PlatformFacade;
use crate::{ERR_POISONED_LOCK, Error, Result, Stopwatch};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Creates stopwatches under unique identifiers and keeps track of all of them.
///
/// Once an identifier has been used to create a stopwatch it stays reserved for the lifetime
/// of the registry. Stopwatches are never removed or replaced.
///
/// Registries are thread-safe. Creating stopwatches concurrently from multiple threads is
/// permitted, and at most one of any set of concurrent `create()` calls with the same
/// identifier succeeds.
///
/// # Examples
///
/// ```
/// use stopwatches::Registry;
///
/// # fn main() -> Result<(), stopwatches::Error> {
/// let registry = Registry::new();
///
/// let parse = registry.create("parse")?;
/// let render = registry.create("render")?;
///
/// // Identifiers are unique within a registry.
/// assert!(registry.create("parse").is_err());
///
/// let all = registry.list();
/// assert_eq!(all.len(), 2);
/// assert!(all.contains(&parse));
/// assert!(all.contains(&render));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Registry {
    stopwatches: Mutex<HashMap<String, Stopwatch>>,
    platform: PlatformFacade,
}

impl Registry {
    /// Creates a new registry without any stopwatches.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stopwatches: Mutex::new(HashMap::new()),
            platform: PlatformFacade::real(),
        }
    }

    /// Creates a new registry with a specific platform.
    ///
    /// This method is primarily used for testing purposes to inject a fake platform
    /// whose clock only moves when the test says so.
    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            stopwatches: Mutex::new(HashMap::new()),
            platform,
        }
    }

    /// The process-wide shared registry.
    ///
    /// Prefer creating an explicit registry with [`Registry::new()`] and passing it to the code
    /// that needs it; the shared instance exists for callers that have no such context.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Creates a stopwatch with the given identifier.
    ///
    /// The new stopwatch is stopped and has no recorded laps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the identifier is empty or if a stopwatch with the
    /// same identifier was already created by this registry.
    pub fn create(&self, id: impl Into<String>) -> Result<Stopwatch> {
        let id = id.into();

        if id.is_empty() {
            tracing::debug!("rejected stopwatch with empty id");
            return Err(Error::invalid_argument(id, "id cannot be empty"));
        }

        let mut stopwatches = self.stopwatches.lock().expect(ERR_POISONED_LOCK);

        match stopwatches.entry(id) {
            Entry::Occupied(entry) => {
                tracing::debug!(id = entry.key().as_str(), "rejected duplicate stopwatch id");
                Err(Error::invalid_argument(entry.key().as_str(), "id already exists"))
            }
            Entry::Vacant(entry) => {
                let stopwatch = Stopwatch::new(entry.key().clone(), self.platform.clone());
                entry.insert(stopwatch.clone());

                tracing::debug!(id = stopwatch.id(), "created stopwatch");

                Ok(stopwatch)
            }
        }
    }

    /// Returns the stopwatch created with the given identifier, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Stopwatch> {
        self.stopwatches
            .lock()
            .expect(ERR_POISONED_LOCK)
            .get(id)
            .cloned()
    }

    /// Returns a snapshot of all stopwatches created so far, in no particular order.
    ///
    /// The snapshot has a fixed length and is not affected by stopwatches created afterwards.
    /// Its elements are live handles to the stopwatches themselves.
    #[must_use]
    pub fn list(&self) -> Box<[Stopwatch]> {
        self.stopwatches
            .lock()
            .expect(ERR_POISONED_LOCK)
            .values()
            .cloned()
            .collect()
    }

    /// The number of stopwatches created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stopwatches.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether no stopwatch has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stopwatches.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::State;
    use crate::pal::FakePlatform;

    fn create_test_registry() -> (Registry, FakePlatform) {
        let fake_platform = FakePlatform::new();
        let registry = Registry::with_platform(PlatformFacade::fake(fake_platform.clone()));
        (registry, fake_platform)
    }

    #[test]
    fn starts_empty() {
        let (registry, _) = create_test_registry();

        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn create_assigns_id_and_initial_state() {
        let (registry, _) = create_test_registry();

        let stopwatch = registry.create("first").unwrap();

        assert_eq!(stopwatch.id(), "first");
        assert_eq!(stopwatch.state(), State::Stopped);
        assert!(stopwatch.lap_times().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn create_rejects_empty_id() {
        let (registry, _) = create_test_registry();

        let result = registry.create("");

        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let (registry, _) = create_test_registry();

        let original = registry.create("dup").unwrap();
        let result = registry.create("dup".to_string());

        assert!(matches!(
            result,
            Err(Error::InvalidArgument { ref id, .. }) if id == "dup"
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list().to_vec(), vec![original]);
    }

    #[test]
    fn duplicate_does_not_replace_existing_stopwatch() {
        let (registry, platform) = create_test_registry();

        let original = registry.create("keep").unwrap();
        original.start().unwrap();
        platform.advance(Duration::from_millis(10));
        original.stop().unwrap();

        registry.create("keep").unwrap_err();

        let stored = registry.get("keep").unwrap();
        assert_eq!(stored.lap_times(), [Duration::from_millis(10)]);
    }

    #[test]
    fn get_returns_same_stopwatch() {
        let (registry, _) = create_test_registry();

        let created = registry.create("shared").unwrap();
        let fetched = registry.get("shared").unwrap();

        created.start().unwrap();
        assert!(fetched.is_running());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn list_contains_every_created_stopwatch() {
        let (registry, _) = create_test_registry();

        for i in 0..5 {
            registry.create(format!("sw_{i}")).unwrap();
        }

        let mut ids: Vec<String> = registry
            .list()
            .iter()
            .map(|stopwatch| stopwatch.id().to_owned())
            .collect();
        ids.sort();

        assert_eq!(ids, ["sw_0", "sw_1", "sw_2", "sw_3", "sw_4"]);
    }

    #[test]
    fn list_is_a_snapshot() {
        let (registry, _) = create_test_registry();
        registry.create("before").unwrap();

        let snapshot = registry.list();
        registry.create("after").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.list().len(), 2);
    }

    #[test]
    fn list_elements_are_live_handles() {
        let (registry, _) = create_test_registry();
        let stopwatch = registry.create("live").unwrap();

        let snapshot = registry.list();
        stopwatch.start().unwrap();

        assert!(snapshot.iter().all(Stopwatch::is_running));
    }

    #[test]
    fn stopwatches_use_registry_platform() {
        let (registry, platform) = create_test_registry();
        let stopwatch = registry.create("timed").unwrap();

        stopwatch.start().unwrap();
        platform.advance(Duration::from_millis(42));

        assert_eq!(stopwatch.stop().unwrap(), Duration::from_millis(42));
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
    }

    static_assertions::assert_impl_all!(Registry: Send, Sync);
}
