//! Read views served by the API and the cache that holds them.
//!
//! Every read goes through a [`ViewKey`]; every write declares the keys it
//! invalidates (see [`WriteRequest::invalidates`](crate::WriteRequest::invalidates)).

use std::collections::HashMap;

use engine::Period;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewGroup {
    Banks,
    Vaults,
    CreditCards,
    Recurring,
    Categories,
    Transactions,
    Dashboard,
}

/// Identifies a cached read.
///
/// A key without a period is a prefix: it covers every period of its group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewKey {
    pub group: ViewGroup,
    pub period: Option<Period>,
}

impl ViewKey {
    #[must_use]
    pub const fn all(group: ViewGroup) -> Self {
        Self {
            group,
            period: None,
        }
    }

    #[must_use]
    pub const fn for_period(group: ViewGroup, period: Period) -> Self {
        Self {
            group,
            period: Some(period),
        }
    }

    #[must_use]
    pub fn covers(&self, other: &ViewKey) -> bool {
        self.group == other.group && (self.period.is_none() || self.period == other.period)
    }
}

/// Raw JSON of the last response per view.
///
/// Every invalidation bumps a generation counter. A read records the
/// generation before it is sent and stores its response only if no
/// invalidation happened meanwhile, so a response older than a write never
/// lands in the cache.
#[derive(Debug, Default)]
pub struct ViewCache {
    entries: HashMap<ViewKey, serde_json::Value>,
    generation: u64,
}

impl ViewCache {
    #[must_use]
    pub fn get(&self, key: &ViewKey) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: ViewKey, value: serde_json::Value) {
        self.entries.insert(key, value);
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stores `value` unless the cache was invalidated since `generation`.
    pub fn insert_if_current(
        &mut self,
        key: ViewKey,
        value: serde_json::Value,
        generation: u64,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Drops every entry covered by one of `keys`; returns how many went.
    pub fn invalidate(&mut self, keys: &[ViewKey]) -> usize {
        self.generation = self.generation.wrapping_add(1);
        let before = self.entries.len();
        self.entries
            .retain(|cached, _| !keys.iter().any(|key| key.covers(cached)));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prefix_key_covers_every_period() {
        let march = ViewKey::for_period(ViewGroup::Transactions, Period::new(3, 2025));
        let april = ViewKey::for_period(ViewGroup::Transactions, Period::new(4, 2025));

        assert!(ViewKey::all(ViewGroup::Transactions).covers(&march));
        assert!(march.covers(&march));
        assert!(!march.covers(&april));
        assert!(!ViewKey::all(ViewGroup::Dashboard).covers(&march));
    }

    #[test]
    fn invalidate_only_drops_covered_entries() {
        let mut cache = ViewCache::default();
        let march = ViewKey::for_period(ViewGroup::Dashboard, Period::new(3, 2025));
        let april = ViewKey::for_period(ViewGroup::Dashboard, Period::new(4, 2025));
        cache.insert(ViewKey::all(ViewGroup::Banks), json!([]));
        cache.insert(march, json!({}));
        cache.insert(april, json!({}));

        let dropped = cache.invalidate(&[march, ViewKey::all(ViewGroup::Vaults)]);

        assert_eq!(dropped, 1);
        assert!(cache.get(&march).is_none());
        assert!(cache.get(&april).is_some());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn response_older_than_an_invalidation_is_not_stored() {
        let mut cache = ViewCache::default();
        let banks = ViewKey::all(ViewGroup::Banks);

        let before_write = cache.generation();
        cache.invalidate(&[banks]);
        assert!(!cache.insert_if_current(banks, json!(["stale"]), before_write));
        assert!(cache.get(&banks).is_none());

        let after_write = cache.generation();
        assert!(cache.insert_if_current(banks, json!(["fresh"]), after_write));
        assert_eq!(cache.get(&banks), Some(&json!(["fresh"])));

        cache.clear();
        assert!(!cache.insert_if_current(banks, json!([]), after_write));
    }
}
