// Write items and their request envelopes
//
// Two envelopes exist in the wild:
// - Transactional (`TransactWriteItems`): {"Put": {"Item": {...}, "TableName": "..."}}
// - Legacy batch-load files:              {"PutRequest": {"Item": {...}}}

use serde::Serialize;
use serde_json::Value;

use crate::attribute::AttributeMap;
use crate::table::TableName;

/// One record ready for submission, bound to its target table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteItem {
    table: TableName,
    attributes: AttributeMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemForm {
    Transact,
    Legacy,
}

#[derive(Serialize)]
struct TransactEnvelope<'a> {
    #[serde(rename = "Put")]
    put: TransactPut<'a>,
}

#[derive(Serialize)]
struct TransactPut<'a> {
    #[serde(rename = "Item")]
    item: &'a AttributeMap,
    #[serde(rename = "TableName")]
    table_name: &'a str,
}

#[derive(Serialize)]
struct LegacyEnvelope<'a> {
    #[serde(rename = "PutRequest")]
    put_request: LegacyPut<'a>,
}

#[derive(Serialize)]
struct LegacyPut<'a> {
    #[serde(rename = "Item")]
    item: &'a AttributeMap,
}

impl WriteItem {
    pub fn new(table: TableName, attributes: AttributeMap) -> Self {
        Self { table, attributes }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Render the item inside the requested request envelope.
    pub fn envelope(&self, form: ItemForm) -> serde_json::Result<Value> {
        match form {
            ItemForm::Transact => serde_json::to_value(TransactEnvelope {
                put: TransactPut {
                    item: &self.attributes,
                    table_name: self.table.as_str(),
                },
            }),
            ItemForm::Legacy => serde_json::to_value(LegacyEnvelope {
                put_request: LegacyPut {
                    item: &self.attributes,
                },
            }),
        }
    }
}
