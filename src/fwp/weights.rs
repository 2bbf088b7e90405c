use std::collections::HashMap;

/// Dense item identifier handed out by a [`WeightTable`].
pub type ItemId = usize;

/// A transaction resolved against a weight table: distinct items in input
/// order plus its weight `tw` (mean of the item weights).
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub items: Vec<ItemId>,
    pub weight: f64,
}

impl Transaction {
    pub fn new(items: Vec<ItemId>, weight: f64) -> Self {
        Self {
            items: dedup_in_order(items),
            weight,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Maps item names to ids and ids to their externally supplied weight.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    names: Vec<String>,
    weights: Vec<f64>,
    index: HashMap<String, ItemId>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items are the column positions `0..weights.len()`, named after them.
    pub fn from_dense(weights: &[f64]) -> Self {
        let mut table = Self::new();
        for (item, &weight) in weights.iter().enumerate() {
            table.insert(item.to_string(), weight);
        }
        table
    }

    /// Registers `name` (or overwrites its weight) and returns its id.
    /// Negative weights are clamped to zero.
    pub fn insert(&mut self, name: impl Into<String>, weight: f64) -> ItemId {
        let name = name.into();
        let weight = weight.max(0.0);
        if let Some(&id) = self.index.get(&name) {
            self.weights[id] = weight;
            return id;
        }
        let id = self.names.len();
        self.index.insert(name.clone(), id);
        self.names.push(name);
        self.weights.push(weight);
        id
    }

    pub fn id(&self, name: &str) -> Option<ItemId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, item: ItemId) -> Option<&str> {
        self.names.get(item).map(String::as_str)
    }

    /// Unknown items weigh nothing.
    pub fn weight(&self, item: ItemId) -> f64 {
        self.weights.get(item).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a transaction given by item names. Names missing from the
    /// table are interned with weight 0.
    pub fn transaction<S: AsRef<str>>(&mut self, names: &[S]) -> Transaction {
        let items: Vec<ItemId> = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                match self.index.get(name) {
                    Some(&id) => id,
                    None => self.insert(name, 0.0),
                }
            })
            .collect();
        self.transaction_from_ids(&items)
    }

    pub fn transaction_from_ids(&self, ids: &[ItemId]) -> Transaction {
        let items = dedup_in_order(ids.to_vec());
        let weight = self.mean_weight(&items);
        Transaction { items, weight }
    }

    pub fn mean_weight(&self, items: &[ItemId]) -> f64 {
        if items.is_empty() {
            return 0.0;
        }
        items.iter().map(|&item| self.weight(item)).sum::<f64>() / items.len() as f64
    }

    /// Renders an itemset with item names, falling back to the raw id.
    pub fn describe(&self, items: &[ItemId]) -> Vec<String> {
        items
            .iter()
            .map(|&item| self.name(item).map_or_else(|| item.to_string(), str::to_owned))
            .collect()
    }
}

fn dedup_in_order(items: Vec<ItemId>) -> Vec<ItemId> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
