// Fixed-size windowing
//
// Windows start at index 0, never overlap and cover the whole sequence; the
// last window holds the remainder.

use anyhow::{bail, Result};
use galleri_core::WriteItem;

/// Most items one transactional write may carry.
pub const MAX_TRANSACT_ITEMS: usize = 100;

/// Validated window size, `1..=MAX_TRANSACT_ITEMS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            bail!("batch size must be at least 1");
        }
        if size > MAX_TRANSACT_ITEMS {
            bail!(
                "batch size {} exceeds the transactional write limit of {}",
                size,
                MAX_TRANSACT_ITEMS
            );
        }
        Ok(Self(size))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// One window of items, submitted as a single transaction.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// 1-based position among the run's batches.
    pub number: usize,
    /// Index of the first item in the full sequence.
    pub offset: usize,
    pub items: &'a [WriteItem],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of windows `len` items split into: `ceil(len / size)`.
pub fn window_count(len: usize, size: BatchSize) -> usize {
    len.div_ceil(size.get())
}

/// Partition `items` into consecutive windows of at most `size` items.
pub fn windows(items: &[WriteItem], size: BatchSize) -> impl Iterator<Item = Batch<'_>> {
    items
        .chunks(size.get())
        .enumerate()
        .map(move |(index, chunk)| Batch {
            number: index + 1,
            offset: index * size.get(),
            items: chunk,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleri_core::{AttributeMap, AttributeValue, TableName};

    fn items(count: usize) -> Vec<WriteItem> {
        (0..count)
            .map(|n| {
                let attributes: AttributeMap =
                    [("Id", AttributeValue::number(n.to_string()))].into_iter().collect();
                WriteItem::new(TableName::new("Table"), attributes)
            })
            .collect()
    }

    #[test]
    fn batch_size_bounds() {
        assert!(BatchSize::new(0).is_err());
        assert!(BatchSize::new(1).is_ok());
        assert!(BatchSize::new(100).is_ok());
        assert!(BatchSize::new(101).is_err());
    }

    #[test]
    fn window_count_is_ceiling() {
        let size = BatchSize::new(25).unwrap();
        assert_eq!(window_count(0, size), 0);
        assert_eq!(window_count(1, size), 1);
        assert_eq!(window_count(25, size), 1);
        assert_eq!(window_count(26, size), 2);
        assert_eq!(window_count(100, size), 4);
    }

    #[test]
    fn every_item_covered_once_from_index_zero() {
        for len in [0, 1, 7, 24, 25, 26, 99, 100, 101, 250] {
            for size in [1, 3, 25, 100] {
                let size = BatchSize::new(size).unwrap();
                let items = items(len);
                let batches: Vec<_> = windows(&items, size).collect();

                assert_eq!(batches.len(), window_count(len, size));

                let covered: Vec<&WriteItem> =
                    batches.iter().flat_map(|batch| batch.items).collect();
                assert_eq!(covered.len(), len);
                assert!(covered.iter().zip(&items).all(|(a, b)| std::ptr::eq(*a, b)));

                if let Some(first) = batches.first() {
                    assert_eq!(first.offset, 0);
                    assert_eq!(first.number, 1);
                }
                assert!(batches.iter().all(|batch| batch.len() <= size.get()));
            }
        }
    }

    #[test]
    fn remainder_lands_in_last_window() {
        let items = items(7);
        let batches: Vec<_> = windows(&items, BatchSize::new(3).unwrap()).collect();
        let lens: Vec<_> = batches.iter().map(Batch::len).collect();
        let offsets: Vec<_> = batches.iter().map(|batch| batch.offset).collect();
        assert_eq!(lens, vec![3, 3, 1]);
        assert_eq!(offsets, vec![0, 3, 6]);
    }
}
