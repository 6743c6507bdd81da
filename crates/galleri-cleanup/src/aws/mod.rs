//! SDK-backed implementations of the administrative API traits.
//!
//! Listing calls follow pagination tokens to the end.

mod backup;
mod eks;
mod iam;
mod logs;
mod s3;

pub use backup::AwsBackup;
pub use eks::AwsEks;
pub use iam::AwsIam;
pub use logs::AwsLogs;
pub use s3::AwsS3;
