// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for generator configs.

use ged_core::{ConfigError, ConfigStore, GeneratorConfig};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory [`ConfigStore`] with call counters and failure switches.
///
/// Clones share storage, so a test can hand one clone to a
/// [`ConfigService`](ged_core::ConfigService) and inspect the other.
///
/// # Example
///
/// ```
/// use ged_core::{ConfigService, GeneratorConfig};
/// use ged_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save("run", &GeneratorConfig::new(3, 7)).unwrap();
/// assert_eq!(store.save_count(), 1);
/// assert!(store.contains_key("run"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `config` as JSON under `key`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Serde`] if the config fails to serialize.
    pub fn with_generator(key: &str, config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let store = Self::new();
        store.put_raw(key, serde_json::to_vec_pretty(config)?);
        Ok(store)
    }

    /// Store raw bytes under `key` without counting a save.
    pub fn put_raw(&self, key: &str, data: impl Into<Vec<u8>>) {
        self.lock().data.insert(key.to_string(), data.into());
    }

    /// Raw bytes under `key`, without counting a load.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    /// Make every subsequent `load_raw` fail (or stop failing).
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Make every subsequent `save_raw` fail (or stop failing).
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts, including failed ones.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts, including failed ones.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Keys currently present, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.lock().data.keys().cloned().collect()
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;

        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }

        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;

        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }

        inner.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use ged_core::ConfigService;

    #[test]
    fn save_then_load_counts_attempts() {
        let store = InMemoryConfigStore::new();
        store.save_raw("k", b"{}").unwrap();
        assert_eq!(store.load_raw("k").unwrap(), b"{}");
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn missing_key_is_not_found() {
        let store = InMemoryConfigStore::new();
        assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn failure_switches_still_count() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        assert!(matches!(
            store.save_raw("k", b"x"),
            Err(ConfigError::Other(_))
        ));
        assert_eq!(store.save_count(), 1);
        assert!(!store.contains_key("k"));

        store.put_raw("k", b"x".to_vec());
        store.set_fail_on_load(true);
        assert!(matches!(store.load_raw("k"), Err(ConfigError::Other(_))));
        store.set_fail_on_load(false);
        assert_eq!(store.load_raw("k").unwrap(), b"x");
    }

    #[test]
    fn seeded_generator_config_loads_back() {
        let config = GeneratorConfig::new(5, 42).with_label_pool(["a", "b"]);
        let store = InMemoryConfigStore::with_generator("run", &config).unwrap();
        assert_eq!(store.save_count(), 0, "seeding bypasses the counters");
        assert_eq!(store.keys(), vec!["run".to_string()]);

        let loaded = ConfigService::new(store.clone())
            .load_generator("run")
            .unwrap();
        assert_eq!(loaded, Some(config));
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn raw_bytes_are_json() {
        let store = InMemoryConfigStore::with_generator("run", &GeneratorConfig::new(1, 2))
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&store.raw("run").unwrap()).unwrap();
        assert_eq!(value["edits"], 1);
        assert_eq!(value["seed"], 2);
    }
}
