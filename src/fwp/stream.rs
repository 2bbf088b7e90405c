use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::debug;

use super::config::WindowConfig;
use super::error::Result;
use super::mining::Miner;
use super::storage::MiningResult;
use super::weights::{ItemId, Transaction, WeightTable};
use super::window::SlidingWindow;

/// Frequent weighted patterns of one window state.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    /// 0 for the initial fill, then one more per slide.
    pub index: usize,
    /// Arrival number of the oldest transaction in the window.
    pub first_transaction: usize,
    pub patterns: MiningResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Filling,
    Sliding,
}

/// Feeds transactions one at a time into a sliding window and mines every
/// window state as soon as it exists.
#[derive(Debug)]
pub struct FwpStream {
    weights: WeightTable,
    config: WindowConfig,
    pending: Vec<Transaction>,
    window: Option<SlidingWindow>,
    /// Window states reached so far, mined or not.
    states: usize,
    cancel: Arc<AtomicBool>,
}

impl FwpStream {
    pub fn new(weights: WeightTable, config: WindowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pending: Vec::with_capacity(config.window_size),
            weights,
            config,
            window: None,
            states: 0,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn phase(&self) -> StreamPhase {
        if self.window.is_some() {
            StreamPhase::Sliding
        } else {
            StreamPhase::Filling
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn window(&self) -> Option<&SlidingWindow> {
        self.window.as_ref()
    }

    /// Setting the flag makes the current and every later mining pass fail
    /// with `Cancelled` until it is cleared again.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Resolves item names against the weight table and pushes the result.
    pub fn push<S: AsRef<str>>(&mut self, names: &[S]) -> Result<Option<WindowReport>> {
        let tx = self.weights.transaction(names);
        self.push_transaction(tx)
    }

    pub fn push_ids(&mut self, ids: &[ItemId]) -> Result<Option<WindowReport>> {
        let tx = self.weights.transaction_from_ids(ids);
        self.push_transaction(tx)
    }

    /// Returns a report once the window is full and after every slide.
    ///
    /// A cancelled mining pass still leaves the slide applied; the window
    /// state keeps its index and the next report carries the one after it.
    pub fn push_transaction(&mut self, tx: Transaction) -> Result<Option<WindowReport>> {
        match self.window.as_mut() {
            Some(window) => {
                window.slide(tx);
            }
            None => {
                self.pending.push(tx);
                if self.pending.len() < self.config.window_size {
                    return Ok(None);
                }
                let initial = std::mem::take(&mut self.pending);
                debug!(transactions = initial.len(), "window filled");
                self.window = Some(SlidingWindow::new(self.config.clone(), initial)?);
            }
        }

        let Some(window) = self.window.as_ref() else {
            return Ok(None);
        };
        let index = self.states;
        self.states += 1;
        let patterns = Miner::new(window).with_cancel(&self.cancel).mine()?;
        Ok(Some(WindowReport {
            index,
            first_transaction: window.first_sequence(),
            patterns,
        }))
    }
}

/// Runs a whole stream of named transactions and collects every report.
pub fn mine_stream<I, T, S>(
    weights: WeightTable,
    config: WindowConfig,
    transactions: I,
) -> Result<Vec<WindowReport>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut stream = FwpStream::new(weights, config)?;
    let mut reports = Vec::new();
    for tx in transactions {
        if let Some(report) = stream.push(tx.as_ref())? {
            reports.push(report);
        }
    }
    Ok(reports)
}
