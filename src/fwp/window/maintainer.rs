use std::collections::VecDeque;

use tracing::{debug, trace};

use super::state::{SlidingWindow, TailEntry};
use crate::fwp::config::WindowConfig;
use crate::fwp::error::{FwpError, Result};
use crate::fwp::tree::{order_transaction, SwnTree};
use crate::fwp::weights::{ItemId, Transaction};

/// What a slide removed from the window.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideOutcome {
    /// `None` only for an empty window, which construction rules out.
    pub evicted: Option<TailEntry>,
    /// Nodes unlinked from their parent while evicting.
    pub detached: usize,
    /// Arena slots reclaimed afterwards.
    pub freed: usize,
}

impl SlidingWindow {
    /// Builds the initial window from exactly `window_size` transactions.
    ///
    /// Each transaction is ordered against the whole batch, inserted, and the
    /// tree is labelled once at the end.
    pub fn new(config: WindowConfig, initial: Vec<Transaction>) -> Result<Self> {
        config.validate()?;
        if initial.len() != config.window_size {
            return Err(FwpError::IncompleteWindow {
                expected: config.window_size,
                actual: initial.len(),
            });
        }

        let batch: Vec<&[ItemId]> = initial.iter().map(|tx| tx.items.as_slice()).collect();
        let mut tree = SwnTree::new();
        let mut tail = VecDeque::with_capacity(config.window_size);

        for (sequence, tx) in initial.iter().enumerate() {
            let ordered = order_transaction(&tx.items, &batch, Some(sequence));
            let leaf = tree.insert(&ordered, tx.weight);
            tail.push_back(TailEntry::new(ordered, leaf, tx.weight, sequence));
        }
        tree.relabel();

        debug!(
            window_size = config.window_size,
            nodes = tree.node_count(),
            "built initial window"
        );

        Ok(Self {
            next_sequence: initial.len(),
            config,
            tree,
            tail,
        })
    }

    /// Admits `tx` and evicts the oldest active transaction.
    ///
    /// The new transaction is ordered against every active one, the oldest
    /// included, before the oldest leaves the queue.
    pub fn slide(&mut self, tx: Transaction) -> SlideOutcome {
        let current: Vec<&[ItemId]> = self.tail.iter().map(|entry| entry.items.as_slice()).collect();
        let ordered = order_transaction(&tx.items, &current, None);
        let evicted = self.tail.pop_front();

        let leaf = self.tree.insert(&ordered, tx.weight);
        self.tail
            .push_back(TailEntry::new(ordered, leaf, tx.weight, self.next_sequence));
        self.next_sequence += 1;
        self.tree.relabel();

        let detached = match &evicted {
            Some(entry) => self.evict(entry),
            None => 0,
        };

        self.tree.relabel();
        let pinned: Vec<_> = self.tail.iter().map(|entry| entry.leaf).collect();
        let freed = self.tree.sweep(&pinned);

        debug!(
            evicted = evicted.as_ref().map(|entry| entry.sequence),
            admitted = self.next_sequence - 1,
            detached,
            freed,
            nodes = self.tree.node_count(),
            "slid window"
        );

        SlideOutcome {
            evicted,
            detached,
            freed,
        }
    }

    /// Removes the contribution of `evicted` from the tree.
    ///
    /// The ancestors strictly between the leaf and the root are decremented
    /// while climbing parent links; any that run dry are unlinked, but the
    /// climb continues from their parent. The leaf itself is decremented
    /// separately, and only while it is still reachable from the root.
    fn evict(&mut self, evicted: &TailEntry) -> usize {
        let root = self.tree.root_index;
        let mut detached = 0;

        let mut current = self.tree.nodes[evicted.leaf].parent;
        while let Some(id) = current {
            if id == root {
                break;
            }
            let node = &mut self.tree.nodes[id];
            let before = node.weight;
            node.weight -= evicted.weight;
            current = node.parent;
            let exhausted = node.is_exhausted(before);
            if exhausted && self.tree.detach(id) {
                trace!(node = id, "detached exhausted ancestor");
                detached += 1;
            }
        }

        if evicted.leaf != root && self.tree.is_attached(evicted.leaf) {
            let node = &mut self.tree.nodes[evicted.leaf];
            let before = node.weight;
            node.weight -= evicted.weight;
            let exhausted = node.is_exhausted(before);
            if exhausted && self.tree.detach(evicted.leaf) {
                trace!(node = evicted.leaf, "detached exhausted leaf");
                detached += 1;
            }
        }

        detached
    }

    /// A tree built from scratch out of the active tail entries, inserted in
    /// their recorded order. Matches the maintained tree by item path.
    pub fn rebuilt_tree(&self) -> SwnTree {
        let mut tree = SwnTree::new();
        for entry in &self.tail {
            tree.insert(&entry.items, entry.weight);
        }
        tree.relabel();
        tree
    }
}
