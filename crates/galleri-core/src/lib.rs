// galleri-core - Record model and row formatting
//
// Turns positional CSV rows into typed write items for the Galleri
// reference-data tables. Everything here is pure: no AWS clients, no async.

pub mod attribute;
pub mod error;
pub mod export;
pub mod format;
pub mod item;
pub mod keys;
pub mod reader;
pub mod schema;
pub mod synthetic;
pub mod table;

pub use attribute::{AttributeMap, AttributeValue};
pub use error::{CoreError, Result};
pub use format::{format, FormatOutcome, SkipReason, SkippedRow};
pub use item::{ItemForm, WriteItem};
pub use keys::{duplicate_keys, DuplicateKey};
pub use schema::{Dataset, Schema};
pub use table::TableName;
