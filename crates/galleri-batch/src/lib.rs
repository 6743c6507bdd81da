// galleri-batch - Windowed transactional submission
//
// Splits formatted items into bounded windows and hands each window to a
// TransactWriter, one at a time.

pub mod submit;
pub mod window;

pub use submit::{BatchFailure, BatchSubmitter, FailurePolicy, SubmissionResult, TransactWriter};
pub use window::{window_count, windows, Batch, BatchSize, MAX_TRANSACT_ITEMS};
