// galleri-cleanup - Teardown of AWS resources by name
//
// Each resource kind follows the same shape: list, filter by name, delete
// dependants, delete the resource, wait where the service deletes
// asynchronously. The first API error stops the run.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub mod api;
pub mod aws;
pub mod eks;
pub mod error;
pub mod iam;
pub mod logs;
pub mod s3;
pub mod vaults;
pub mod wait;

pub use error::{CleanupError, Result};
pub use wait::{wait_until, WaitPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    BackupVaults,
    LogGroups,
    Eks,
    IamPolicies,
    S3Buckets,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::BackupVaults,
        ResourceKind::LogGroups,
        ResourceKind::Eks,
        ResourceKind::IamPolicies,
        ResourceKind::S3Buckets,
    ];

    /// Log groups are matched anywhere in the name, everything else by prefix.
    pub fn name_match(&self) -> NameMatch {
        match self {
            ResourceKind::LogGroups => NameMatch::Contains,
            _ => NameMatch::Prefix,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::BackupVaults => "backup-vaults",
            ResourceKind::LogGroups => "log-groups",
            ResourceKind::Eks => "eks",
            ResourceKind::IamPolicies => "iam-policies",
            ResourceKind::S3Buckets => "s3-buckets",
        };
        f.write_str(name)
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "Unknown resource kind '{}'. Supported: backup-vaults, log-groups, eks, iam-policies, s3-buckets",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Prefix,
    Contains,
}

impl NameMatch {
    pub fn matches(&self, name: &str, pattern: &str) -> bool {
        match self {
            NameMatch::Prefix => name.starts_with(pattern),
            NameMatch::Contains => name.contains(pattern),
        }
    }

    /// Names from `names` selected by `pattern`, in their listed order.
    pub fn select(&self, names: Vec<String>, pattern: &str) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| self.matches(name, pattern))
            .collect()
    }
}

/// Removes one kind of resource.
#[async_trait]
pub trait Cleaner: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Names of the resources `pattern` selects. Nothing is deleted.
    async fn find(&self, pattern: &str) -> Result<Vec<String>>;

    /// Delete one resource and everything that has to go before it.
    ///
    /// `pattern` is the one the resource was found with; some kinds use it
    /// to select dependants.
    async fn remove(&self, name: &str, pattern: &str) -> Result<()>;
}

/// Resources a run would delete. Empty patterns are refused.
pub async fn plan(cleaner: &dyn Cleaner, pattern: &str) -> Result<Vec<String>> {
    if pattern.trim().is_empty() {
        return Err(CleanupError::EmptyPattern);
    }
    let targets = cleaner.find(pattern).await?;
    tracing::info!(
        kind = %cleaner.kind(),
        pattern,
        matched = targets.len(),
        "Planned cleanup"
    );
    Ok(targets)
}

/// Delete `targets` found with `pattern` in order, stopping at the first error.
///
/// Returns the names removed.
pub async fn execute(
    cleaner: &dyn Cleaner,
    pattern: &str,
    targets: &[String],
) -> Result<Vec<String>> {
    let mut removed = Vec::with_capacity(targets.len());
    for target in targets {
        tracing::info!(kind = %cleaner.kind(), resource = %target, "Deleting");
        if let Err(err) = cleaner.remove(target, pattern).await {
            tracing::error!(
                kind = %cleaner.kind(),
                resource = %target,
                removed = removed.len(),
                remaining = targets.len() - removed.len(),
                error = %err,
                "Cleanup halted"
            );
            return Err(err);
        }
        removed.push(target.clone());
    }
    tracing::info!(kind = %cleaner.kind(), removed = removed.len(), "Cleanup finished");
    Ok(removed)
}
