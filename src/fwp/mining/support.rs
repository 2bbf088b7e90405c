use crate::fwp::weights::{ItemId, Transaction};
use crate::fwp::window::TailEntry;

/// Weighted support of `itemset` over the active tail entries: the share of
/// `total_weight` carried by entries containing every item of it.
/// Zero when the window carries no weight.
pub fn weighted_support<'a, I>(entries: I, itemset: &[ItemId], total_weight: f64) -> f64
where
    I: IntoIterator<Item = &'a TailEntry>,
{
    if total_weight <= 0.0 {
        return 0.0;
    }
    let covered: f64 = entries
        .into_iter()
        .filter(|entry| entry.contains_all(itemset))
        .map(|entry| entry.weight)
        .sum();
    covered / total_weight
}

/// Weighted support straight from raw transactions, independent of any
/// tree or tail bookkeeping.
pub fn weighted_support_bruteforce(transactions: &[Transaction], itemset: &[ItemId]) -> f64 {
    let total: f64 = transactions.iter().map(|tx| tx.weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let covered: f64 = transactions
        .iter()
        .filter(|tx| itemset.iter().all(|item| tx.items.contains(item)))
        .map(|tx| tx.weight)
        .sum();
    covered / total
}
