//! OptionStore - CRUD over the option collection with a sliding TTL.
//!
//! The whole collection lives under one key as a JSON array; a second key
//! holds the absolute expiry timestamp. Both are read and written together.
//! Every successful read or write slides the expiry to `now + ttl`. Once the
//! expiry has passed the collection is logically empty and is removed on the
//! next access.
//!
//! Records are re-normalized on load. A record that cannot be repaired is
//! dropped on its own; the rest of the collection survives, and the repaired
//! collection is written back so regenerated ids stay stable.
//!
//! ## Example
//!
//! ```ignore
//! use wheel_local::{InMemoryKeyValueStore, OptionInput, OptionStore, SystemClock};
//!
//! let store = OptionStore::new(InMemoryKeyValueStore::new(), SystemClock);
//! let run = store.add(OptionInput::new("Run").weight(5).tags(["fitness"]))?;
//! assert_eq!(store.get(&run.id), Some(run));
//! ```

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::error::{OptionError, StorageError};
use crate::option::{generate_id, normalize, OptionInput, WheelOption};
use crate::selector;
use crate::storage::KeyValueStore;

/// Attempts at a random id suffix before falling back to a counter.
const MAX_ID_ATTEMPTS: usize = 32;

/// Sum of weights over a caller-supplied subset.
pub fn total_weight(options: &[WheelOption]) -> u32 {
    options.iter().map(|o| u32::from(o.weight)).sum()
}

/// The local option collection.
pub struct OptionStore<S, C> {
    storage: S,
    clock: C,
    config: StoreConfig,
}

impl<S: KeyValueStore, C: Clock> OptionStore<S, C> {
    /// Create a store with default keys and TTL, and run the expiry check.
    pub fn new(storage: S, clock: C) -> Self {
        Self::with_config(storage, clock, StoreConfig::default())
    }

    /// Create a store with explicit settings, and run the expiry check.
    pub fn with_config(storage: S, clock: C, config: StoreConfig) -> Self {
        let store = Self {
            storage,
            clock,
            config,
        };
        store.init();
        store
    }

    /// Clear an expired collection, otherwise slide the expiry forward.
    ///
    /// Runs on construction so no read in a session sees stale data.
    pub fn init(&self) {
        if self.is_expired() {
            debug!(key = %self.config.storage_key, "local options expired, clearing");
            if let Err(e) = self.clear() {
                warn!(error = %e, "failed to clear expired options");
            }
        } else if let Err(e) = self.touch() {
            warn!(error = %e, "failed to extend options expiry");
        }
    }

    /// True once the stored expiry lies in the past.
    ///
    /// A missing expiry is not expired. An unreadable one is.
    pub fn is_expired(&self) -> bool {
        match self.storage.get_item(&self.config.expiry_key) {
            Ok(None) => false,
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(expiry) => self.clock.now_millis() > expiry,
                Err(_) => {
                    warn!(value = %raw, "unparseable options expiry");
                    true
                }
            },
            Err(e) => {
                warn!(error = %e, "failed to read options expiry");
                false
            }
        }
    }

    /// The absolute expiry timestamp, if one is stored.
    pub fn expires_at(&self) -> Option<u64> {
        self.storage
            .get_item(&self.config.expiry_key)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse().ok())
    }

    /// All stored options in insertion order. Empty if absent, expired or corrupted.
    pub fn get_all(&self) -> Vec<WheelOption> {
        let options = self.load();
        if !options.is_empty() {
            if let Err(e) = self.touch() {
                warn!(error = %e, "failed to extend options expiry");
            }
        }
        options
    }

    /// Number of stored options.
    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Look up an option by id.
    pub fn get(&self, id: &str) -> Option<WheelOption> {
        self.get_all().into_iter().find(|o| o.id == id)
    }

    /// Normalize and append a new option.
    ///
    /// A caller-supplied id is kept unless it is blank or already taken.
    pub fn add(&self, input: OptionInput) -> Result<WheelOption, OptionError> {
        let mut options = self.load();

        let id = self.assign_id(input.id.as_deref(), &options);
        let option = normalize(input, id)?;
        options.push(option.clone());
        self.save(&options)?;

        debug!(id = %option.id, count = options.len(), "added local option");
        Ok(option)
    }

    /// Merge `input` into the stored option and re-normalize. The id is preserved.
    pub fn update(&self, id: &str, input: OptionInput) -> Result<WheelOption, OptionError> {
        let mut options = self.load();
        let index = options
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| OptionError::NotFound(id.to_string()))?;

        let existing = &options[index];
        let updated = normalize(input.merged_over(existing), existing.id.clone())?;
        options[index] = updated.clone();
        self.save(&options)?;

        debug!(id = %id, "updated local option");
        Ok(updated)
    }

    /// Remove an option by id.
    pub fn delete(&self, id: &str) -> Result<(), OptionError> {
        let options = self.load();
        let before = options.len();
        let remaining: Vec<WheelOption> = options.into_iter().filter(|o| o.id != id).collect();

        if remaining.len() == before {
            return Err(OptionError::NotFound(id.to_string()));
        }

        self.save(&remaining)?;
        debug!(id = %id, count = remaining.len(), "deleted local option");
        Ok(())
    }

    /// Remove the collection and its expiry.
    pub fn clear(&self) -> Result<(), OptionError> {
        let collection = self.storage.remove_item(&self.config.storage_key);
        let expiry = self.storage.remove_item(&self.config.expiry_key);
        collection?;
        expiry?;
        Ok(())
    }

    /// Union of all tags, sorted ascending.
    pub fn all_tags(&self) -> BTreeSet<String> {
        self.get_all()
            .into_iter()
            .flat_map(|o| o.tags)
            .collect()
    }

    /// Sum of weights over `options`.
    pub fn total_weight(options: &[WheelOption]) -> u32 {
        total_weight(options)
    }

    /// Stored options that fit `ceiling` minutes and carry every tag in `tags`.
    pub fn filter<T: AsRef<str>>(&self, ceiling: Option<u16>, tags: &[T]) -> Vec<WheelOption> {
        let options = self.get_all();
        let options = selector::filter_by_duration(&options, ceiling);
        selector::filter_by_tags(&options, tags)
    }

    /// Weighted random draw over the stored options.
    pub fn select_random<T: AsRef<str>>(
        &self,
        ceiling: Option<u16>,
        tags: &[T],
    ) -> Option<WheelOption> {
        selector::select_random(&self.get_all(), ceiling, tags)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the collection, clearing it first if it has expired.
    fn load(&self) -> Vec<WheelOption> {
        if self.is_expired() {
            if let Err(e) = self.clear() {
                warn!(error = %e, "failed to clear expired options");
            }
            return Vec::new();
        }

        let raw = match self.storage.get_item(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read local options");
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %StorageError::from(e), "failed to parse local options");
                return Vec::new();
            }
        };

        let total = records.len();
        let mut options: Vec<WheelOption> = Vec::with_capacity(total);
        let mut repaired = false;
        for record in records {
            match self.restore(&record, &options) {
                Some(option) => {
                    repaired |= serde_json::to_value(&option).ok().as_ref() != Some(&record);
                    options.push(option);
                }
                None => repaired = true,
            }
        }

        if repaired {
            warn!(
                kept = options.len(),
                dropped = total - options.len(),
                "repaired local options"
            );
            if let Err(e) = self.save(&options) {
                warn!(error = %e, "failed to write repaired options");
            }
        }
        options
    }

    /// Re-normalize one persisted record, or `None` if it is beyond repair.
    fn restore(&self, record: &Value, kept: &[WheelOption]) -> Option<WheelOption> {
        let input = match OptionInput::deserialize(record) {
            Ok(input) => input,
            Err(e) => {
                warn!(error = %e, "dropping unreadable local option");
                return None;
            }
        };
        let id = self.assign_id(input.id.as_deref(), kept);
        match normalize(input, id) {
            Ok(option) => Some(option),
            Err(e) => {
                warn!(error = %e, "dropping invalid local option");
                None
            }
        }
    }

    /// Persist the collection, then slide the expiry.
    fn save(&self, options: &[WheelOption]) -> Result<(), OptionError> {
        let json = serde_json::to_string(options).map_err(StorageError::from)?;
        self.storage.set_item(&self.config.storage_key, &json)?;
        self.touch()?;
        Ok(())
    }

    fn touch(&self) -> Result<(), StorageError> {
        let expiry = self.clock.now_millis().saturating_add(self.config.ttl_ms);
        self.storage
            .set_item(&self.config.expiry_key, &expiry.to_string())
    }

    /// Keep `requested` unless it is blank or already taken.
    fn assign_id(&self, requested: Option<&str>, taken: &[WheelOption]) -> String {
        match requested.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) if !taken.iter().any(|o| o.id == id) => id.to_string(),
            _ => self.fresh_id(taken),
        }
    }

    fn fresh_id(&self, taken: &[WheelOption]) -> String {
        let is_taken = |id: &str| taken.iter().any(|o| o.id == id);
        let mut rng = rand::thread_rng();
        let mut id = generate_id(self.clock.now_millis(), &mut rng);
        for _ in 1..MAX_ID_ATTEMPTS {
            if !is_taken(&id) {
                return id;
            }
            id = generate_id(self.clock.now_millis(), &mut rng);
        }

        // suffix space exhausted for this millisecond
        let mut n: u64 = 1;
        loop {
            let candidate = format!("{id}-{n}");
            if !is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
