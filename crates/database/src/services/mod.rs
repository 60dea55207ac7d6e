pub mod building;
pub mod lecturer;
pub mod reservation;
pub mod room;
pub mod schedule;

use std::{collections::HashMap, hash::Hash};

/// Offset pagination for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Groups rows under a key, keeping their original order within each group
fn group_by<K, V>(items: Vec<V>, key: impl Fn(&V) -> K) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash,
{
    let mut groups: HashMap<K, Vec<V>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Indexes rows by a unique key
fn index_by<K, V>(items: Vec<V>, key: impl Fn(&V) -> K) -> HashMap<K, V>
where
    K: Eq + Hash,
{
    items.into_iter().map(|item| (key(&item), item)).collect()
}
