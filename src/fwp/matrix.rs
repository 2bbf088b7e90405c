use ndarray::ArrayView2;

use super::weights::ItemId;

/// Convert binary transaction matrix to list of item sets
pub fn transactions_from_matrix(transactions: ArrayView2<i32>) -> Vec<Vec<ItemId>> {
    transactions
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &present)| present != 0)
                .map(|(item, _)| item)
                .collect()
        })
        .collect()
}
