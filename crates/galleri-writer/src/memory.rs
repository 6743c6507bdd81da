// In-memory keyed store
//
// Stands in for DynamoDB on dry runs and in tests. Items are keyed by table
// and key attribute; a put on an existing key replaces the stored item. A
// batch is checked in full before anything is stored, so a rejected batch
// leaves the store untouched.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use galleri_batch::TransactWriter;
use galleri_core::{AttributeMap, WriteItem};
use parking_lot::Mutex;

use crate::error::{Result, WriterError};

#[derive(Debug, Default)]
struct State {
    items: BTreeMap<(String, String), AttributeMap>,
    transactions: usize,
}

#[derive(Debug)]
pub struct MemoryStore {
    key: String,
    state: Mutex<State>,
}

impl MemoryStore {
    /// Store whose items are identified by the `key` attribute.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn write(&self, items: &[WriteItem]) -> Result<()> {
        let mut keys = Vec::with_capacity(items.len());
        let mut seen = HashSet::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let value = item
                .attributes()
                .get(&self.key)
                .and_then(|value| value.key_text())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    WriterError::transaction_canceled(vec![format!(
                        "item {}: ValidationError missing key attribute '{}'",
                        index, self.key
                    )])
                })?;

            let key = (item.table().to_string(), value.to_string());
            if !seen.insert(key.clone()) {
                return Err(WriterError::transaction_canceled(vec![format!(
                    "item {}: ValidationError key '{}' appears twice in one transaction",
                    index, value
                )]));
            }
            keys.push(key);
        }

        let mut state = self.state.lock();
        for (key, item) in keys.into_iter().zip(items) {
            state.items.insert(key, item.attributes().clone());
        }
        state.transactions += 1;
        Ok(())
    }

    pub fn get(&self, table: &str, key: &str) -> Option<AttributeMap> {
        self.state
            .lock()
            .items
            .get(&(table.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of distinct items held across all tables.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct items held for one table.
    pub fn table_len(&self, table: &str) -> usize {
        self.state
            .lock()
            .items
            .keys()
            .filter(|(stored, _)| stored == table)
            .count()
    }

    /// Committed transactions so far.
    pub fn transactions(&self) -> usize {
        self.state.lock().transactions
    }
}

#[async_trait]
impl TransactWriter for MemoryStore {
    async fn transact_write(&self, items: &[WriteItem]) -> anyhow::Result<()> {
        self.write(items)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleri_core::{AttributeValue, TableName};

    fn item(id: &str, board: &str) -> WriteItem {
        let attributes: AttributeMap = [
            ("Id", AttributeValue::number(id)),
            ("Board", AttributeValue::string(board)),
        ]
        .into_iter()
        .collect();
        WriteItem::new(TableName::new("ParticipatingIcb"), attributes)
    }

    #[test]
    fn put_overwrites_existing_key() {
        let store = MemoryStore::new("Id");
        store.write(&[item("1", "old")]).unwrap();
        store.write(&[item("1", "new")]).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.transactions(), 2);
        let stored = store.get("ParticipatingIcb", "1").unwrap();
        assert_eq!(stored.get("Board"), Some(&AttributeValue::string("new")));
    }

    #[test]
    fn rejected_batch_stores_nothing() {
        let store = MemoryStore::new("Id");
        let err = store
            .write(&[item("1", "a"), item("2", "b"), item("1", "c")])
            .unwrap_err();

        assert!(matches!(err, WriterError::TransactionCanceled { .. }));
        assert!(err.to_string().contains("item 2"));
        assert!(store.is_empty());
        assert_eq!(store.transactions(), 0);
    }

    #[test]
    fn missing_key_rejects_batch() {
        let store = MemoryStore::new("PersonId");
        assert!(store.write(&[item("1", "a")]).is_err());
        assert!(store.is_empty());
    }
}
