use crate::fwp::weights::ItemId;

/// Index of a node slot in the tree arena. Stable across relabelling.
pub type NodeId = usize;

/// First `pre` label handed out by a relabel pass.
pub const PRE_BASE: usize = 0;
/// First `post` label handed out by a relabel pass.
pub const POST_BASE: usize = 1;

/// Relative tolerance for exhaustion. Mean item weights are rarely exact in
/// binary floating point, so adding and later subtracting the same
/// transaction weights can leave a tiny positive residue.
pub const ZERO_WEIGHT: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SwnNode {
    /// `None` only for the root.
    pub item: Option<ItemId>,
    /// Sum of `tw` over active transactions whose path passes through here.
    pub weight: f64,
    pub pre: usize,
    pub post: usize,
    pub parent: Option<NodeId>,
    /// Creation order; sibling items are unique.
    pub children: Vec<NodeId>,
    pub(crate) vacant: bool,
}

/// Weighted shared-prefix tree over ordered transactions.
///
/// Nodes live in an arena; detached nodes keep their parent link so that an
/// eviction walk that starts below a detached ancestor still climbs to the
/// root. Slots are reclaimed only by [`SwnTree::sweep`].
#[derive(Debug, Clone)]
pub struct SwnTree {
    pub(crate) nodes: Vec<SwnNode>,
    pub(crate) free: Vec<NodeId>,
    pub root_index: NodeId,
}

impl SwnNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            weight: 0.0,
            pre: 0,
            post: 0,
            parent: None,
            children: Vec::new(),
            vacant: false,
        }
    }

    pub fn new_item(item: ItemId, weight: f64, parent: NodeId) -> Self {
        Self {
            item: Some(item),
            weight,
            pre: 0,
            post: 0,
            parent: Some(parent),
            children: Vec::new(),
            vacant: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.item.is_none()
    }

    /// Whether the weight left after a decrement is residue of `before`,
    /// the weight the node carried prior to it.
    pub fn is_exhausted(&self, before: f64) -> bool {
        self.weight <= ZERO_WEIGHT * before.abs()
    }
}

impl Default for SwnTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SwnTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![SwnNode::new_root()],
            free: Vec::new(),
            root_index: 0,
        }
    }

    pub fn root(&self) -> &SwnNode {
        &self.nodes[self.root_index]
    }

    pub fn node(&self, id: NodeId) -> Option<&SwnNode> {
        self.nodes.get(id).filter(|node| !node.vacant)
    }

    /// Live slots, including the root and detached-but-pinned nodes.
    pub fn live_slots(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, node: SwnNode) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }
}
