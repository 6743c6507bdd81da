// Key uniqueness check
//
// A transaction may not touch the same item twice, and a repeated key across
// batches silently overwrites the earlier record. Loads check for repeats
// before anything is submitted.

use std::collections::HashMap;

use crate::item::WriteItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub value: String,
    /// 0-based positions of every item carrying this key.
    pub positions: Vec<usize>,
}

/// Key values that occur more than once, in order of first appearance.
///
/// Items without a scalar value under `key` are ignored.
pub fn duplicate_keys(items: &[WriteItem], key: &str) -> Vec<DuplicateKey> {
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for (position, item) in items.iter().enumerate() {
        let Some(value) = item.attributes().get(key).and_then(|v| v.key_text()) else {
            continue;
        };
        positions
            .entry(value)
            .or_insert_with(|| {
                order.push(value);
                Vec::new()
            })
            .push(position);
    }

    order
        .into_iter()
        .filter_map(|value| {
            let found = positions.remove(value)?;
            (found.len() > 1).then(|| DuplicateKey {
                value: value.to_string(),
                positions: found,
            })
        })
        .collect()
}
