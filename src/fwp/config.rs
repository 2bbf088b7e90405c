use serde::{Deserialize, Serialize};

use super::error::{FwpError, Result};

/// How the optimistic bound of a WL-list intersection is decremented when a
/// record cannot be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruningBound {
    /// Subtract the record's raw weight from a bound that starts as the sum of
    /// two weighted supports. Aggressive: most pairs whose occurrences are not
    /// perfectly nested get pruned.
    #[default]
    RawWeight,
    /// Subtract `weight / TTW`, keeping the bound in support units.
    Normalized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Number of most recent transactions kept active.
    pub window_size: usize,
    /// Minimum weighted support, in `[0, 1]`.
    pub min_weighted_support: f64,
    pub pruning: PruningBound,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            min_weighted_support: 0.3,
            pruning: PruningBound::RawWeight,
        }
    }
}

impl WindowConfig {
    pub fn new(window_size: usize, min_weighted_support: f64) -> Self {
        Self {
            window_size,
            min_weighted_support,
            pruning: PruningBound::default(),
        }
    }

    pub fn with_pruning(mut self, pruning: PruningBound) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(FwpError::InvalidWindowSize(self.window_size));
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.min_weighted_support) {
            return Err(FwpError::InvalidMinSupport(self.min_weighted_support));
        }
        Ok(())
    }
}
