// galleri-ops - Reference-data loading and AWS cleanup
//
// The binary in main.rs parses flags and resolves configuration; the
// commands here do the work against the member crates.

pub mod aws;
pub mod commands;
mod init;

pub use init::init_tracing;
