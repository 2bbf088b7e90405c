use crate::fwp::weights::ItemId;

/// Permutes `items` so that transactions sharing items tend to share tree
/// prefixes.
///
/// Each consulted transaction splits the working sequence into items it
/// contains and items it lacks; the lacking ones go first for the next pass.
/// The accumulated order is reversed at the end, so items shared with many
/// transactions end up near the root. Relative order among unmatched items is
/// never changed, which resolves ties by input order.
///
/// `own` is the position of the transaction inside `window`; it is skipped
/// unless it is the last position.
pub fn order_transaction<T: AsRef<[ItemId]>>(
    items: &[ItemId],
    window: &[T],
    own: Option<usize>,
) -> Vec<ItemId> {
    if window.is_empty() {
        return items.to_vec();
    }

    let last = window.len() - 1;
    let mut working = items.to_vec();
    let mut sorted: Vec<ItemId> = Vec::with_capacity(items.len());

    for (i, other) in window.iter().enumerate() {
        if !sorted.is_empty() {
            working = std::mem::take(&mut sorted);
        }
        if own == Some(i) && i != last {
            continue;
        }

        let other = other.as_ref();
        let mut remaining = Vec::with_capacity(working.len());
        for &item in &working {
            if other.contains(&item) && !sorted.contains(&item) {
                sorted.push(item);
            } else {
                remaining.push(item);
            }
        }

        if !working.is_empty() {
            remaining.append(&mut sorted);
            sorted = remaining;
        }
    }

    sorted.reverse();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ItemId = 0;
    const B: ItemId = 1;
    const C: ItemId = 2;

    fn window() -> Vec<Vec<ItemId>> {
        vec![vec![A, B], vec![B, C], vec![A, C]]
    }

    #[test]
    fn test_order_skips_own_position() {
        let w = window();
        assert_eq!(order_transaction(&w[0], &w, Some(0)), vec![A, B]);
        assert_eq!(order_transaction(&w[1], &w, Some(1)), vec![C, B]);
    }

    #[test]
    fn test_order_last_position_consults_itself() {
        let w = window();
        assert_eq!(order_transaction(&w[2], &w, Some(2)), vec![C, A]);
    }

    #[test]
    fn test_single_transaction_window() {
        let w = vec![vec![B, A, C]];
        // Every item matches itself, so the pass keeps input order and the
        // final reversal flips it.
        assert_eq!(order_transaction(&w[0], &w, Some(0)), vec![C, A, B]);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let w = vec![vec![3, 1], vec![1, 2, 4], vec![4, 3], vec![0]];
        let items = vec![4, 0, 2, 1, 3];
        let mut ordered = order_transaction(&items, &w, None);
        assert_eq!(ordered.len(), items.len());
        ordered.sort_unstable();
        assert_eq!(ordered, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_transaction_and_empty_window() {
        let w = window();
        assert!(order_transaction(&[], &w, None).is_empty());
        let none: Vec<Vec<ItemId>> = Vec::new();
        assert_eq!(order_transaction(&[B, A], &none, None), vec![B, A]);
    }
}
