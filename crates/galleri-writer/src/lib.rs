// galleri-writer - TransactWriter implementations
//
// DynamoWriter talks to DynamoDB; MemoryStore keeps items in process for
// dry runs.

pub mod dynamo;
pub mod error;
pub mod memory;

pub use dynamo::DynamoWriter;
pub use error::{ErrorCode, Result, WriterError};
pub use memory::MemoryStore;
