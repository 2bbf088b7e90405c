// Tree module - SWN-tree arena, pre/post labelling and transaction ordering

mod order;
mod tree;
mod tree_ops;

pub use order::order_transaction;
pub use tree::{NodeId, SwnNode, SwnTree, POST_BASE, PRE_BASE, ZERO_WEIGHT};
