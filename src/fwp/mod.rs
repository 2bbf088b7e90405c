pub mod config;
pub mod error;
pub mod matrix;
pub mod mining;
pub mod storage;
pub mod stream;
pub mod tree;
pub mod weights;
pub mod window;


pub use config::{PruningBound, WindowConfig};
pub use error::{FwpError, Result};
pub use matrix::transactions_from_matrix;
pub use mining::{weighted_support_bruteforce, Itemset, Miner};
pub use storage::{FrequentLevel, FrequentPattern, ItemsetStorage, MiningResult};
pub use stream::{mine_stream, FwpStream, StreamPhase, WindowReport};
pub use tree::{NodeId, SwnNode, SwnTree};
pub use weights::{ItemId, Transaction, WeightTable};
pub use window::{SlideOutcome, SlidingWindow, TailEntry};
