use std::collections::VecDeque;

use crate::fwp::config::WindowConfig;
use crate::fwp::tree::{NodeId, SwnTree};
use crate::fwp::weights::ItemId;

/// Bookkeeping for one active transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TailEntry {
    /// Items in the order they were inserted into the tree.
    pub items: Vec<ItemId>,
    /// Node reached by the insertion; the root for an empty transaction.
    pub leaf: NodeId,
    pub weight: f64,
    /// Arrival number of the transaction, counted from 0.
    pub sequence: usize,
    members: Vec<ItemId>,
}

impl TailEntry {
    pub(crate) fn new(items: Vec<ItemId>, leaf: NodeId, weight: f64, sequence: usize) -> Self {
        let mut members = items.clone();
        members.sort_unstable();
        Self {
            items,
            leaf,
            weight,
            sequence,
            members,
        }
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.members.binary_search(&item).is_ok()
    }

    pub fn contains_all(&self, items: &[ItemId]) -> bool {
        items.iter().all(|&item| self.contains(item))
    }
}

impl AsRef<[ItemId]> for TailEntry {
    fn as_ref(&self) -> &[ItemId] {
        &self.items
    }
}

/// The SWN-tree together with the FIFO of active transactions.
///
/// Owns the tree exclusively; every structural change goes through the
/// maintainer operations, which relabel before returning.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    pub(crate) config: WindowConfig,
    pub(crate) tree: SwnTree,
    /// Oldest first.
    pub(crate) tail: VecDeque<TailEntry>,
    pub(crate) next_sequence: usize,
}

impl SlidingWindow {
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn tree(&self) -> &SwnTree {
        &self.tree
    }

    pub fn tail(&self) -> &VecDeque<TailEntry> {
        &self.tail
    }

    pub fn len(&self) -> usize {
        self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    /// TTW: summed weight of the active transactions.
    pub fn total_weight(&self) -> f64 {
        self.tail.iter().map(|entry| entry.weight).sum()
    }

    /// Arrival number of the oldest active transaction.
    pub fn first_sequence(&self) -> usize {
        self.tail.front().map_or(self.next_sequence, |entry| entry.sequence)
    }
}
