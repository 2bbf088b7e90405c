use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::weights::ItemId;

/// Memory-efficient itemset storage using flat arrays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsetStorage {
    items: Vec<ItemId>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<f64>,
}

/// All frequent itemsets of one size
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentLevel {
    pub(crate) storage: ItemsetStorage,
    pub itemset_size: usize,
}

/// One frequent weighted pattern, items in ascending id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentPattern {
    pub items: Vec<ItemId>,
    pub weighted_support: f64,
}

/// Frequent weighted patterns of one window state, grouped by size and
/// deduplicated by member set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiningResult {
    levels: Vec<FrequentLevel>,
    index: HashMap<Vec<ItemId>, (usize, usize)>,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// `items` must already be sorted and free of duplicates.
    pub fn add_itemset(&mut self, items: &[ItemId], support: f64) -> usize {
        let start = self.items.len();
        self.items.extend_from_slice(items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);
        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[ItemId] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn support(&self, idx: usize) -> f64 {
        self.supports[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[ItemId] {
        self.storage.get_itemset(idx)
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[ItemId]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    pub fn supports(&self) -> &[f64] {
        &self.storage.supports
    }
}

impl MiningResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pattern unless an equal member set is already present.
    /// Returns whether it was new.
    pub fn insert(&mut self, items: &[ItemId], weighted_support: f64) -> bool {
        if items.is_empty() || self.index.contains_key(items) {
            return false;
        }
        let size = items.len();
        while self.levels.len() < size {
            self.levels.push(FrequentLevel::new(self.levels.len() + 1));
        }
        let idx = self.levels[size - 1].storage.add_itemset(items, weighted_support);
        self.index.insert(items.to_vec(), (size - 1, idx));
        true
    }

    /// Levels by itemset size; level `k - 1` holds the `k`-itemsets.
    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Weighted support of the pattern with exactly these (sorted) items.
    pub fn support(&self, items: &[ItemId]) -> Option<f64> {
        self.index
            .get(items)
            .map(|&(level, idx)| self.levels[level].storage.support(idx))
    }

    pub fn contains(&self, items: &[ItemId]) -> bool {
        self.index.contains_key(items)
    }

    pub fn patterns(&self) -> impl Iterator<Item = FrequentPattern> + '_ {
        self.levels.iter().flat_map(|level| {
            (0..level.len()).map(move |idx| FrequentPattern {
                items: level.get_itemset(idx).to_vec(),
                weighted_support: level.storage.support(idx),
            })
        })
    }
}
