//! Keyed persistence for values that should outlive their owner.
//!
//! This module provides write-through persistence against a string
//! key-value store, enabling state to survive restarts. Values are encoded
//! through a [`Codec`]; the default is JSON via serde.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod error;

pub use error::PersistError;

/// String-keyed storage backend.
///
/// Implementations are expected to be cheap to read and infallible; a
/// backend with real I/O failures should handle them internally and
/// surface missing data as `None`.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Delete the value stored under `key`, if any.
    fn remove(&self, key: &str);
}

/// In-memory [`KeyValueStore`].
///
/// Clones share the same entries, so one store can back several
/// persisted values.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True while nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The currently stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Conversion between a value and its stored string form.
pub trait Codec<T> {
    /// Encode `value` to its stored form.
    fn encode(&self, value: &T) -> Result<String, PersistError>;

    /// Decode a value from its stored form.
    fn decode(&self, raw: &str) -> Result<T, PersistError>;
}

/// JSON codec via serde. The default for persisted values.
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<String, PersistError> {
        serde_json::to_string(value).map_err(|e| PersistError::EncodeFailed(e.to_string()))
    }

    fn decode(&self, raw: &str) -> Result<T, PersistError> {
        serde_json::from_str(raw).map_err(|e| PersistError::DecodeFailed(e.to_string()))
    }
}

/// Codec built from a pair of closures, for formats serde does not cover.
pub struct FnCodec<T> {
    encode: Box<dyn Fn(&T) -> Result<String, PersistError> + Send + Sync>,
    decode: Box<dyn Fn(&str) -> Result<T, PersistError> + Send + Sync>,
}

impl<T> FnCodec<T> {
    /// Create a codec from `encode` and `decode` closures.
    pub fn new(
        encode: impl Fn(&T) -> Result<String, PersistError> + Send + Sync + 'static,
        decode: impl Fn(&str) -> Result<T, PersistError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }
}

impl<T> Codec<T> for FnCodec<T> {
    fn encode(&self, value: &T) -> Result<String, PersistError> {
        (self.encode)(value)
    }

    fn decode(&self, raw: &str) -> Result<T, PersistError> {
        (self.decode)(raw)
    }
}

/// Value kept in sync with a key-value store.
///
/// On load, an existing entry is decoded; a missing entry falls back to
/// the default. An entry that no longer decodes is removed and replaced
/// by the default rather than failing the load. Every change writes
/// through to the store immediately.
///
/// # Example
///
/// ```rust
/// use tidepool::persist::{MemoryStore, PersistedValue};
///
/// let store = MemoryStore::new();
///
/// let mut count = PersistedValue::load_or(store.clone(), "count", 0_i64)?;
/// count.set(3)?;
/// drop(count);
///
/// // A later load picks the value back up.
/// let count = PersistedValue::load_or(store, "count", 0_i64)?;
/// assert_eq!(*count.get(), 3);
/// # Ok::<(), tidepool::persist::PersistError>(())
/// ```
pub struct PersistedValue<T, S: KeyValueStore> {
    key: String,
    value: T,
    store: S,
    codec: Box<dyn Codec<T> + Send + Sync>,
}

impl<T: 'static, S: KeyValueStore> PersistedValue<T, S> {
    /// Load the value under `key`, falling back to `default`.
    ///
    /// Uses the JSON codec.
    pub fn load_or(store: S, key: impl Into<String>, default: T) -> Result<Self, PersistError>
    where
        T: Serialize + DeserializeOwned,
    {
        Self::with_codec(store, key, JsonCodec, || default)
    }

    /// Load the value under `key`, falling back to `default()`.
    ///
    /// The default is only computed when needed, which matters when it
    /// is expensive to produce. Uses the JSON codec.
    pub fn load_or_else<F>(store: S, key: impl Into<String>, default: F) -> Result<Self, PersistError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        Self::with_codec(store, key, JsonCodec, default)
    }

    /// Load the value under `key` with a custom codec.
    pub fn with_codec<C, F>(
        store: S,
        key: impl Into<String>,
        codec: C,
        default: F,
    ) -> Result<Self, PersistError>
    where
        C: Codec<T> + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let key = key.into();
        let codec: Box<dyn Codec<T> + Send + Sync> = Box::new(codec);
        let value = match store.get(&key) {
            Some(raw) => match codec.decode(&raw) {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!(
                        target: "tidepool::persist",
                        key = %key,
                        %error,
                        "stored value unreadable, falling back to default"
                    );
                    store.remove(&key);
                    default()
                }
            },
            None => default(),
        };
        let persisted = Self {
            key,
            value,
            store,
            codec,
        };
        persisted.write_through()?;
        Ok(persisted)
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it through to the store.
    pub fn set(&mut self, value: T) -> Result<(), PersistError> {
        self.value = value;
        self.write_through()
    }

    /// Derive the next value from the current one and write it through.
    pub fn update<F>(&mut self, f: F) -> Result<&T, PersistError>
    where
        F: FnOnce(&T) -> T,
    {
        self.value = f(&self.value);
        self.write_through()?;
        Ok(&self.value)
    }

    /// Move the value to a new key.
    ///
    /// The entry under the old key is removed before the value is written
    /// under the new one. A no-op when the key is unchanged.
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<(), PersistError> {
        let key = key.into();
        if key == self.key {
            return Ok(());
        }
        self.store.remove(&self.key);
        tracing::debug!(target: "tidepool::persist", key = %self.key, "entry removed");
        self.key = key;
        self.write_through()
    }

    /// The key the value is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn write_through(&self) -> Result<(), PersistError> {
        let raw = self.codec.encode(&self.value)?;
        self.store.set(&self.key, &raw);
        tracing::debug!(target: "tidepool::persist", key = %self.key, "value written");
        Ok(())
    }
}
