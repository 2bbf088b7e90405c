pub mod itemset;
pub mod miner;
pub mod support;
pub mod wl_list;

pub use itemset::Itemset;
pub use miner::Miner;
pub use support::{weighted_support, weighted_support_bruteforce};
pub use wl_list::{intersect, BoundParams, Occurrences, WlList, WlRecord, WlRegistry};
