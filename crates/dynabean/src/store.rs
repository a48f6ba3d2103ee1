//! Property stores
//!
//! A [`PropertyStore`] maps property names to values, sorted by name so that
//! equality and hashing do not depend on assignment order. It never holds
//! null: writing null removes the entry.

use std::cell::RefCell;
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::value::Value;

/// Raw, untyped access to a dynabean's properties
///
/// Writes go through `&self` because the store behind an instance is shared
/// by every handle to that instance.
pub trait BeanProperties {
    /// Read a property; `None` when unset
    fn get(&self, property: &str) -> Option<Value>;

    /// Write a property; null removes it
    fn set(&self, property: &str, value: Value);
}

/// Backing store of a single dynabean instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyStore {
    entries: BTreeMap<String, Value>,
}

impl PropertyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.entries.get(property)
    }

    /// Upsert a property; null removes it
    pub fn insert(&mut self, property: impl Into<String>, value: Value) {
        let property = property.into();
        if value.is_null() {
            self.entries.remove(&property);
        } else {
            self.entries.insert(property, value);
        }
    }

    /// Remove a property, returning its previous value
    pub fn remove(&mut self, property: &str) -> Option<Value> {
        self.entries.remove(property)
    }

    /// Check if a property is set
    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    /// Get number of set properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no property is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of set properties, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Iterate `(name, value)` pairs sorted by name
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PropertyStore {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut store = PropertyStore::new();
        for (name, value) in iter {
            store.insert(name, value);
        }
        store
    }
}

impl BeanProperties for RefCell<PropertyStore> {
    fn get(&self, property: &str) -> Option<Value> {
        self.borrow().get(property).cloned()
    }

    fn set(&self, property: &str, value: Value) {
        self.borrow_mut().insert(property, value);
    }
}
