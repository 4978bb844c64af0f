//! Entity rollups
//!
//! Three aggregators share one pattern: keep the families named in the
//! routing table, pull identity labels off every sample, apply the
//! namespace selector and fold the value into a lazily created row.
//! Node capacity samples carry no namespace and are never filtered.

mod deployments;
mod nodes;
mod pods;
pub mod routes;


pub use deployments::rollup_deployments;
pub use nodes::rollup_nodes;
pub use pods::{rollup_pods, PodRollup};
pub use routes::{route, Combine, RollupKind, Route, Target, ROUTES};

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Rows keyed by identity, iterated in first-seen order
#[derive(Debug, Clone)]
pub struct Rollup<K, R> {
    index: HashMap<K, usize>,
    rows: Vec<(K, R)>,
}

impl<K, R> Default for Rollup<K, R> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }
}

impl<K: PartialEq, R: PartialEq> PartialEq for Rollup<K, R> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<K: Eq + Hash + Clone, R> Rollup<K, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row for `key`, created with `init` on first reference
    pub fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> R) -> &mut R {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.rows.len();
                self.index.insert(key.clone(), idx);
                self.rows.push((key, init()));
                idx
            }
        };
        &mut self.rows[idx].1
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&idx| &self.rows[idx].1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &R)> {
        self.rows.iter().map(|(key, row)| (key, row))
    }
}

impl<K: Eq + Hash + Clone, R: Default> Rollup<K, R> {
    pub fn entry(&mut self, key: K) -> &mut R {
        self.get_or_insert_with(key, R::default)
    }
}
