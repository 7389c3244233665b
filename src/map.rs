//! Ordered map type for decoded tables.
//!
//! This module provides [`HostMap`], a wrapper around [`IndexMap`] that keeps
//! keys in insertion order. Decoding a TOML table yields its keys in exactly
//! the order they appear in the document, and encoding a `HostMap` writes them
//! back in the same order.
//!
//! ## Examples
//!
//! ```rust
//! use tomlconv::{HostMap, HostValue};
//!
//! let mut map = HostMap::new();
//! map.insert("name".to_string(), HostValue::from("Alice"));
//! map.insert("age".to_string(), HostValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::HostValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to host values.
///
/// # Examples
///
/// ```rust
/// use tomlconv::{HostMap, HostValue};
///
/// let mut map = HostMap::new();
/// map.insert("c".to_string(), HostValue::from(1));
/// map.insert("a".to_string(), HostValue::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["c", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostMap(IndexMap<String, HostValue>);

impl HostMap {
    /// Creates an empty `HostMap`.
    #[must_use]
    pub fn new() -> Self {
        HostMap(IndexMap::new())
    }

    /// Creates an empty `HostMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        HostMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced in place
    /// (the key keeps its original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::{HostMap, HostValue};
    ///
    /// let mut map = HostMap::new();
    /// assert!(map.insert("key".to_string(), HostValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), HostValue::from(43)).is_some());
    /// assert_eq!(map.get("key").and_then(|v| v.as_i64()), Some(43));
    /// ```
    pub fn insert(&mut self, key: String, value: HostValue) -> Option<HostValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut HostValue> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, HostValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, HostValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, HostValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, HostValue>> for HostMap {
    fn from(map: HashMap<String, HostValue>) -> Self {
        HostMap(map.into_iter().collect())
    }
}

impl From<IndexMap<String, HostValue>> for HostMap {
    fn from(map: IndexMap<String, HostValue>) -> Self {
        HostMap(map)
    }
}

impl From<HostMap> for IndexMap<String, HostValue> {
    fn from(map: HostMap) -> Self {
        map.0
    }
}

impl IntoIterator for HostMap {
    type Item = (String, HostValue);
    type IntoIter = indexmap::map::IntoIter<String, HostValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HostMap {
    type Item = (&'a String, &'a HostValue);
    type IntoIter = indexmap::map::Iter<'a, String, HostValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, HostValue)> for HostMap {
    fn from_iter<T: IntoIterator<Item = (String, HostValue)>>(iter: T) -> Self {
        HostMap(IndexMap::from_iter(iter))
    }
}
