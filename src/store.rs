//! Ordered key/value-list store backing local mode

use rustc_hash::FxHashMap;

/// Insertion-ordered key -> value-list store.
///
/// Keys keep their first-insertion position; re-setting a key replaces
/// its values in place. Lookups go through a hash index, iteration
/// through the ordered key list.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    keys: Vec<String>,
    values: FxHashMap<String, Vec<String>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut store = Self::new();
        for (key, values) in pairs {
            store.set(key, values);
        }
        store
    }

    pub fn set(&mut self, key: String, values: Vec<String>) {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, values);
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Values for a key; a missing key reads as empty.
    pub fn values(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// ", "-joined string form of a key's values.
    pub fn value_string(&self, key: &str) -> String {
        self.values(key).join(", ")
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
