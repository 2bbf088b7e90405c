use std::collections::BTreeMap;

use tracing::trace;

use super::tree::{NodeId, SwnNode, SwnTree, POST_BASE, PRE_BASE};
use crate::fwp::weights::ItemId;

impl SwnTree {
    /// Adds `weight` along the path of `items`, creating missing nodes, and
    /// returns the last node reached (the root for an empty transaction).
    ///
    /// Labels are stale afterwards until [`SwnTree::relabel`] runs.
    pub fn insert(&mut self, items: &[ItemId], weight: f64) -> NodeId {
        let mut current_index = self.root_index;

        for &item in items {
            if let Some(child_index) = self.child(current_index, item) {
                self.nodes[child_index].weight += weight;
                current_index = child_index;
            } else {
                let new_index = self.alloc(SwnNode::new_item(item, weight, current_index));
                self.nodes[current_index].children.push(new_index);
                current_index = new_index;
            }
        }

        current_index
    }

    /// Overwrites every attached node's `(pre, post)` with a fresh depth-first
    /// numbering starting at [`PRE_BASE`] / [`POST_BASE`].
    pub fn relabel(&mut self) {
        let (next_pre, next_post) = self.label_subtree(self.root_index, PRE_BASE, POST_BASE);
        trace!(
            nodes = next_pre - PRE_BASE,
            last_post = next_post - 1,
            "relabelled tree"
        );
    }

    /// Labels the subtree under `start`, threading the next free pre and post
    /// values through and returning them.
    fn label_subtree(&mut self, start: NodeId, mut pre: usize, mut post: usize) -> (usize, usize) {
        self.nodes[start].pre = pre;
        pre += 1;
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

        while let Some((id, cursor)) = stack.pop() {
            match self.nodes[id].children.get(cursor).copied() {
                Some(child) => {
                    stack.push((id, cursor + 1));
                    self.nodes[child].pre = pre;
                    pre += 1;
                    stack.push((child, 0));
                }
                None => {
                    self.nodes[id].post = post;
                    post += 1;
                }
            }
        }

        (pre, post)
    }

    pub fn child(&self, parent: NodeId, item: ItemId) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].item == Some(item))
    }

    /// Unlinks `id` (and with it, its subtree) from its parent's child list.
    /// The node keeps its own parent link. Returns whether a link was removed.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes[id].parent else {
            return false;
        };
        let siblings = &mut self.nodes[parent].children;
        let before = siblings.len();
        siblings.retain(|&child| child != id);
        siblings.len() != before
    }

    /// Whether `id` can be reached from the root through child links.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let mut current = id;
        let mut parent = node.parent;
        while let Some(p) = parent {
            if !self.nodes[p].children.contains(&current) {
                return false;
            }
            current = p;
            parent = self.nodes[p].parent;
        }
        current == self.root_index
    }

    /// Label-based ancestor test; only meaningful on a relabelled tree.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let (u, v) = (&self.nodes[ancestor], &self.nodes[descendant]);
        u.pre <= v.pre && u.post >= v.post
    }

    /// Items on the path from the root down to `id`.
    pub fn path_items(&self, id: NodeId) -> Vec<ItemId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(i) = current {
            if let Some(item) = self.nodes[i].item {
                path.push(item);
            }
            current = self.nodes[i].parent;
        }
        path.reverse();
        path
    }

    /// Attached nodes in depth-first pre-order, root first.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root_index];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    /// Attached non-root nodes.
    pub fn node_count(&self) -> usize {
        self.preorder().len() - 1
    }

    /// Attached nodes keyed by their item path.
    pub fn weight_by_path(&self) -> BTreeMap<Vec<ItemId>, f64> {
        self.preorder()
            .into_iter()
            .filter(|&id| id != self.root_index)
            .map(|id| (self.path_items(id), self.nodes[id].weight))
            .collect()
    }

    /// Frees every slot that is neither reachable from the root nor on the
    /// ancestor chain of one of `pinned`. Returns how many slots were freed.
    pub fn sweep(&mut self, pinned: &[NodeId]) -> usize {
        let mut keep = vec![false; self.nodes.len()];
        for id in self.preorder() {
            keep[id] = true;
        }
        for &leaf in pinned {
            let mut current = Some(leaf);
            while let Some(id) = current {
                if keep[id] {
                    break;
                }
                keep[id] = true;
                current = self.nodes[id].parent;
            }
        }

        let mut freed = 0;
        for id in 0..self.nodes.len() {
            if keep[id] {
                self.nodes[id].children.retain(|&child| keep[child]);
            } else if !self.nodes[id].vacant {
                let node = &mut self.nodes[id];
                node.vacant = true;
                node.children.clear();
                node.parent = None;
                self.free.push(id);
                freed += 1;
            }
        }
        freed
    }
}
