// Submission behaviour against a scripted writer.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use galleri_batch::{BatchSize, BatchSubmitter, FailurePolicy, TransactWriter};
use galleri_core::{AttributeMap, AttributeValue, TableName, WriteItem};
use parking_lot::Mutex;

/// Records every call and fails the calls whose 1-based number is listed.
#[derive(Default)]
struct ScriptedWriter {
    fail_calls: HashSet<usize>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedWriter {
    fn failing(calls: &[usize]) -> Self {
        Self {
            fail_calls: calls.iter().copied().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TransactWriter for ScriptedWriter {
    async fn transact_write(&self, items: &[WriteItem]) -> Result<()> {
        let ids = items
            .iter()
            .filter_map(|item| item.attributes().get("Id"))
            .filter_map(AttributeValue::key_text)
            .map(str::to_string)
            .collect();

        let call = {
            let mut calls = self.calls.lock();
            calls.push(ids);
            calls.len()
        };

        if self.fail_calls.contains(&call) {
            bail!("TransactionCanceledException: simulated failure on call {}", call);
        }
        Ok(())
    }
}

fn items(count: usize) -> Vec<WriteItem> {
    (0..count)
        .map(|n| {
            let attributes: AttributeMap = [
                ("Id", AttributeValue::number(n.to_string())),
                ("IcbCode", AttributeValue::string(format!("ICB{}", n))),
            ]
            .into_iter()
            .collect();
            WriteItem::new(TableName::new("dev-ParticipatingIcb"), attributes)
        })
        .collect()
}

#[tokio::test]
async fn failed_middle_batch_does_not_stop_the_run() {
    let writer = Arc::new(ScriptedWriter::failing(&[3]));
    let submitter = BatchSubmitter::new(writer.clone(), BatchSize::new(10).unwrap());

    let result = submitter.submit(&items(50)).await;

    assert_eq!(result.total, 5);
    assert_eq!(result.attempted, 5);
    assert_eq!(result.failed, 1);
    assert_eq!(result.succeeded, 4);
    assert_eq!(result.items_written, 40);
    assert!(!result.is_success());

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].number, 3);
    assert_eq!(result.failures[0].offset, 20);
    assert!(result.failures[0]
        .error
        .contains("TransactionCanceledException"));

    assert_eq!(writer.calls().len(), 5);
}

#[tokio::test]
async fn abort_policy_stops_at_first_failure() {
    let writer = Arc::new(ScriptedWriter::failing(&[2]));
    let submitter = BatchSubmitter::new(writer.clone(), BatchSize::new(25).unwrap())
        .with_policy(FailurePolicy::Abort);

    let result = submitter.submit(&items(100)).await;

    assert_eq!(result.total, 4);
    assert_eq!(result.attempted, 2);
    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.not_attempted(), 2);
    assert_eq!(writer.calls().len(), 2);
}

#[tokio::test]
async fn first_item_is_submitted_in_first_batch() {
    let writer = Arc::new(ScriptedWriter::default());
    let submitter = BatchSubmitter::new(writer.clone(), BatchSize::new(25).unwrap());

    let result = submitter.submit(&items(26)).await;
    assert!(result.is_success());

    let calls = writer.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].first().map(String::as_str), Some("0"));
    assert_eq!(calls[0].len(), 25);
    assert_eq!(calls[1], vec!["25".to_string()]);
}

#[tokio::test]
async fn items_are_submitted_in_input_order() {
    let writer = Arc::new(ScriptedWriter::default());
    let submitter = BatchSubmitter::new(writer.clone(), BatchSize::new(7).unwrap());

    submitter.submit(&items(30)).await;

    let submitted: Vec<String> = writer.calls().into_iter().flatten().collect();
    let expected: Vec<String> = (0..30).map(|n| n.to_string()).collect();
    assert_eq!(submitted, expected);
}
