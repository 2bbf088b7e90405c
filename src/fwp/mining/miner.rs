use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, trace};

use super::itemset::Itemset;
use super::support::weighted_support;
use super::wl_list::{intersect, BoundParams, Occurrences, WlList, WlRecord, WlRegistry};
use crate::fwp::config::PruningBound;
use crate::fwp::error::{FwpError, Result};
use crate::fwp::storage::MiningResult;
use crate::fwp::weights::ItemId;
use crate::fwp::window::SlidingWindow;

/// One mining pass over a relabelled window snapshot.
///
/// Borrows the window immutably, so a slide cannot run while the pass is
/// alive.
pub struct Miner<'w> {
    window: &'w SlidingWindow,
    min_weighted_support: f64,
    pruning: PruningBound,
    total_weight: f64,
    cancel: Option<&'w AtomicBool>,
}

impl<'w> Miner<'w> {
    pub fn new(window: &'w SlidingWindow) -> Self {
        let config = window.config();
        Self {
            window,
            min_weighted_support: config.min_weighted_support,
            pruning: config.pruning,
            total_weight: window.total_weight(),
            cancel: None,
        }
    }

    /// Polled on entry to every extension level; once set, the pass stops
    /// with [`FwpError::Cancelled`].
    pub fn with_cancel(mut self, flag: &'w AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn weighted_support(&self, items: &[ItemId]) -> f64 {
        weighted_support(self.window.tail(), items, self.total_weight)
    }

    fn bound_params(&self) -> BoundParams {
        BoundParams {
            min_weighted_support: self.min_weighted_support,
            pruning: self.pruning,
            total_weight: self.total_weight,
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(FwpError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Frequent single items in first-seen traversal order, each with its
    /// weighted support, plus their occurrence lists.
    pub fn build_single_item_index(&self) -> (Vec<(Itemset, f64)>, WlRegistry) {
        let tree = self.window.tree();
        let mut verdicts: HashMap<ItemId, bool> = HashMap::new();
        let mut singles = Vec::new();
        let mut lists: HashMap<ItemId, WlList> = HashMap::new();

        for id in tree.preorder() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            let Some(item) = node.item else {
                continue;
            };
            let frequent = *verdicts.entry(item).or_insert_with(|| {
                let ws = self.weighted_support(&[item]);
                let frequent = ws >= self.min_weighted_support;
                if frequent {
                    singles.push((Itemset::single(item), ws));
                }
                frequent
            });
            if frequent {
                lists.entry(item).or_default().push(WlRecord {
                    pre: node.pre,
                    post: node.post,
                    weight: node.weight,
                });
            }
        }

        let registry = lists
            .into_iter()
            .map(|(item, list)| (Itemset::single(item), list))
            .collect();
        (singles, registry)
    }

    /// Mines every frequent weighted pattern of the window.
    pub fn mine(&self) -> Result<MiningResult> {
        self.check_cancelled()?;
        let mut result = MiningResult::new();
        if self.total_weight <= 0.0 {
            return Ok(result);
        }

        let (mut singles, registry) = self.build_single_item_index();
        singles.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (itemset, ws) in &singles {
            result.insert(itemset.items(), *ws);
        }
        let frequent: Vec<Itemset> = singles.into_iter().map(|(itemset, _)| itemset).collect();
        self.find_frequent_extensions(&frequent, &registry, &mut result)?;

        debug!(
            window_start = self.window.first_sequence(),
            total_weight = self.total_weight,
            singles = frequent.len(),
            patterns = result.len(),
            "mined window"
        );
        Ok(result)
    }

    /// Extends each itemset with every itemset before it in `frequent`,
    /// keeping unions whose weighted support reaches the threshold, then
    /// recurses on those unions ordered by the `pre` of their first
    /// occurrence.
    pub fn find_frequent_extensions(
        &self,
        frequent: &[Itemset],
        registry: &WlRegistry,
        out: &mut MiningResult,
    ) -> Result<()> {
        self.check_cancelled()?;

        let params = self.bound_params();
        let supports: Vec<f64> = frequent
            .par_iter()
            .map(|itemset| self.weighted_support(itemset.items()))
            .collect();
        let mut next_registry = WlRegistry::new();

        for i in (1..frequent.len()).rev() {
            let Some(wl_i) = registry.get(&frequent[i]) else {
                continue;
            };
            let first = Occurrences {
                itemset: &frequent[i],
                list: wl_i,
                support: supports[i],
            };

            let unions: Vec<Option<(Itemset, WlList)>> = (0..i)
                .into_par_iter()
                .rev()
                .map(|j| {
                    let wl_j = registry.get(&frequent[j])?;
                    let second = Occurrences {
                        itemset: &frequent[j],
                        list: wl_j,
                        support: supports[j],
                    };
                    intersect(first, second, &params)
                })
                .collect();

            let mut next: Vec<Itemset> = Vec::new();
            for (union, list) in unions.into_iter().flatten() {
                // Adds nothing when the other side was already a subset.
                if union.len() == frequent[i].len() {
                    continue;
                }
                let ws = self.weighted_support(union.items());
                next_registry.entry(union.clone()).or_insert(list);
                if ws >= self.min_weighted_support {
                    out.insert(union.items(), ws);
                    if !next.contains(&union) {
                        next.push(union);
                    }
                }
            }

            if next.is_empty() {
                continue;
            }
            next.sort_by_key(|itemset| {
                next_registry
                    .get(itemset)
                    .and_then(|list| list.first())
                    .map_or(usize::MAX, |record| record.pre)
            });
            trace!(
                base = ?frequent[i].items(),
                candidates = next.len(),
                "descending into extensions"
            );
            self.find_frequent_extensions(&next, &next_registry, out)?;
        }

        Ok(())
    }
}
