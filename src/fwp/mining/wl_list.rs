use std::collections::HashMap;

use tracing::trace;

use super::itemset::Itemset;
use crate::fwp::config::PruningBound;

/// One tree position realising an itemset, with the co-occurrence weight
/// accumulated there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WlRecord {
    pub pre: usize,
    pub post: usize,
    pub weight: f64,
}

/// Occurrence list, ascending by `pre`.
pub type WlList = Vec<WlRecord>;

/// Occurrence lists by itemset. The first list registered for a member set
/// wins.
pub type WlRegistry = HashMap<Itemset, WlList>;

/// An itemset, its occurrence list and its weighted support.
#[derive(Debug, Clone, Copy)]
pub struct Occurrences<'a> {
    pub itemset: &'a Itemset,
    pub list: &'a [WlRecord],
    pub support: f64,
}

/// Threshold and bound bookkeeping for [`intersect`].
#[derive(Debug, Clone, Copy)]
pub struct BoundParams {
    pub min_weighted_support: f64,
    pub pruning: PruningBound,
    /// TTW of the window the lists were built from.
    pub total_weight: f64,
}

impl BoundParams {
    fn lost(&self, weight: f64) -> f64 {
        match self.pruning {
            PruningBound::RawWeight => weight,
            PruningBound::Normalized if self.total_weight > 0.0 => weight / self.total_weight,
            PruningBound::Normalized => weight,
        }
    }
}

/// Merges two occurrence lists into the list of their union.
///
/// A record of `second` matches a record of `first` when it sits strictly
/// above it on the same path; the combined record takes the upper node's
/// coordinates and the lower record's weight, accumulating while consecutive
/// `first` records fall under the same upper node. Unmatched records are
/// charged against the optimistic bound `first.support + second.support`;
/// once it drops below the threshold the union is abandoned.
///
/// Returns `None` when pruned or when nothing matched.
pub fn intersect(
    first: Occurrences<'_>,
    second: Occurrences<'_>,
    params: &BoundParams,
) -> Option<(Itemset, WlList)> {
    let (wl1, wl2) = (first.list, second.list);
    let mut bound = first.support + second.support;
    let mut merged: WlList = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < wl1.len() && j < wl2.len() {
        let (lower, upper) = (wl1[i], wl2[j]);
        if upper.pre < lower.pre {
            if upper.post > lower.post {
                match merged.last_mut() {
                    Some(last) if last.pre == upper.pre && last.post == upper.post => {
                        last.weight += lower.weight;
                    }
                    _ => merged.push(WlRecord {
                        pre: upper.pre,
                        post: upper.post,
                        weight: lower.weight,
                    }),
                }
                i += 1;
            } else {
                bound -= params.lost(upper.weight);
                j += 1;
            }
        } else {
            bound -= params.lost(lower.weight);
            i += 1;
        }

        if bound < params.min_weighted_support {
            trace!(
                first = ?first.itemset.items(),
                second = ?second.itemset.items(),
                bound,
                "pruned intersection"
            );
            return None;
        }
    }

    if merged.is_empty() {
        return None;
    }
    Some((first.itemset.union(second.itemset), merged))
}
