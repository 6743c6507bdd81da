// DynamoDB TransactWriteItems writer
//
// Each batch becomes one TransactWriteItems call with a Put per item. The
// table is taken from each item, so one call may span tables.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::types::{self as ddb, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;
use galleri_batch::TransactWriter;
use galleri_core::{AttributeMap, AttributeValue, WriteItem};

use crate::error::{Result, WriterError};

pub struct DynamoWriter {
    client: Client,
}

impl DynamoWriter {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Commit `items` as one transaction.
    pub async fn write(&self, items: &[WriteItem]) -> Result<()> {
        let transact_items = items
            .iter()
            .map(transact_item)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            items = transact_items.len(),
            table = %items.first().map(|item| item.table().as_str()).unwrap_or_default(),
            "TransactWriteItems"
        );
        self.client
            .transact_write_items()
            .set_transact_items(Some(transact_items))
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(TransactWriteItemsError::TransactionCanceledException(cancelled)) => {
                    tracing::debug!(
                        reasons = cancelled.cancellation_reasons().len(),
                        "Transaction cancelled"
                    );
                    WriterError::transaction_canceled(
                        cancelled
                            .cancellation_reasons()
                            .iter()
                            .enumerate()
                            .filter(|(_, reason)| reason.code().is_some_and(|code| code != "None"))
                            .map(|(index, reason)| {
                                format!(
                                    "item {}: {} {}",
                                    index,
                                    reason.code().unwrap_or_default(),
                                    reason.message().unwrap_or_default()
                                )
                                .trim_end()
                                .to_string()
                            })
                            .collect(),
                    )
                }
                _ => WriterError::write_failure(DisplayErrorContext(&err).to_string()),
            })?;

        Ok(())
    }
}

#[async_trait]
impl TransactWriter for DynamoWriter {
    async fn transact_write(&self, items: &[WriteItem]) -> anyhow::Result<()> {
        self.write(items).await?;
        Ok(())
    }
}

fn transact_item(item: &WriteItem) -> Result<TransactWriteItem> {
    let put = Put::builder()
        .table_name(item.table().as_str())
        .set_item(Some(sdk_item(item.attributes())))
        .build()
        .map_err(|err| {
            WriterError::invalid_item(format!("put for table '{}': {}", item.table(), err))
        })?;
    Ok(TransactWriteItem::builder().put(put).build())
}

/// Convert an attribute map to the SDK's item representation.
pub fn sdk_item(attributes: &AttributeMap) -> HashMap<String, ddb::AttributeValue> {
    attributes
        .iter()
        .map(|(name, value)| (name.to_string(), sdk_value(value)))
        .collect()
}

fn sdk_value(value: &AttributeValue) -> ddb::AttributeValue {
    match value {
        AttributeValue::S(text) => ddb::AttributeValue::S(text.clone()),
        AttributeValue::N(text) => ddb::AttributeValue::N(text.clone()),
        AttributeValue::Bool(flag) => ddb::AttributeValue::Bool(*flag),
        AttributeValue::M(entries) => ddb::AttributeValue::M(sdk_item(entries)),
    }
}
