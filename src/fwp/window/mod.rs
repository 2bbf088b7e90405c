pub mod maintainer;
pub mod state;

pub use maintainer::SlideOutcome;
pub use state::{SlidingWindow, TailEntry};
