//! Row to write-item formatting.

use std::fmt;

use crate::item::WriteItem;
use crate::schema::Schema;
use crate::table::TableName;

/// Why a row did not produce an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooShort { found: usize, required: usize },
    UnexpectedWidth { found: usize, expected: Vec<usize> },
    MissingValue { attribute: &'static str },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooShort { found, required } => {
                write!(f, "row has {} columns, needs at least {}", found, required)
            }
            SkipReason::UnexpectedWidth { found, expected } => {
                write!(f, "row has {} columns, expected one of {:?}", found, expected)
            }
            SkipReason::MissingValue { attribute } => {
                write!(f, "required attribute '{}' is empty", attribute)
            }
        }
    }
}

/// A rejected row. `row` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct FormatOutcome {
    pub items: Vec<WriteItem>,
    pub skipped: Vec<SkippedRow>,
}

impl FormatOutcome {
    pub fn rows_seen(&self) -> usize {
        self.items.len() + self.skipped.len()
    }
}

/// Map rows to write items for `table` using `schema`.
///
/// Output order follows input order. Rows the schema rejects are recorded in
/// `skipped` and never abort the pass.
pub fn format<I, R, S>(rows: I, schema: &Schema, table: &TableName) -> FormatOutcome
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut outcome = FormatOutcome::default();

    for (index, row) in rows.into_iter().enumerate() {
        match schema.apply(row.as_ref()) {
            Ok(attributes) => outcome
                .items
                .push(WriteItem::new(table.clone(), attributes)),
            Err(reason) => {
                tracing::debug!(schema = schema.name, row = index + 1, %reason, "Skipping row");
                outcome.skipped.push(SkippedRow {
                    row: index + 1,
                    reason,
                });
            }
        }
    }

    outcome
}
