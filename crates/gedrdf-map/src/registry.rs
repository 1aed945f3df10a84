//! Identity registry: the only place record ids and graph nodes are correlated.
//!
//! One registry is owned by one transform invocation and dropped with it.
//! Forward mapping registers `Xref → NodeId`; reverse mapping registers
//! `NodeId → Xref`. Both directions are kept so the mapping stays injective:
//! a key cannot be registered twice and a value cannot be claimed by two keys.

use crate::error::{MapError, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct IdentityRegistry<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
    order: Vec<K>,
}

impl<K, V> Default for IdentityRegistry<K, V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K, V> IdentityRegistry<K, V>
where
    K: Clone + Eq + Hash + fmt::Display,
    V: Clone + Eq + Hash + fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`. Re-registering either side is an error; existing
    /// bindings are never overwritten.
    pub fn register(&mut self, key: K, value: V) -> Result<()> {
        if self.forward.contains_key(&key) {
            return Err(MapError::DuplicateId {
                id: key.to_string(),
            });
        }
        if self.backward.contains_key(&value) {
            return Err(MapError::DuplicateId {
                id: value.to_string(),
            });
        }
        self.forward.insert(key.clone(), value.clone());
        self.backward.insert(value, key.clone());
        self.order.push(key);
        Ok(())
    }

    /// Look up `key`, failing with a dangling-reference error naming
    /// `referrer` when it was never registered.
    pub fn resolve(&self, key: &K, referrer: impl fmt::Display) -> Result<&V> {
        self.forward
            .get(key)
            .ok_or_else(|| MapError::DanglingReference {
                id: key.to_string(),
                referrer: referrer.to_string(),
            })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Inverse lookup.
    pub fn key_of(&self, value: &V) -> Option<&K> {
        self.backward.get(value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().filter_map(|k| self.forward.get(k).map(|v| (k, v)))
    }
}
