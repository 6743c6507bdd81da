// Backup vaults
//
// A vault can only be deleted once it holds no recovery points, and point
// deletion finishes asynchronously.

use async_trait::async_trait;

use crate::api::BackupApi;
use crate::error::Result;
use crate::wait::{wait_until, WaitPolicy};
use crate::{Cleaner, ResourceKind};

pub struct VaultCleaner<A> {
    api: A,
    wait: WaitPolicy,
}

impl<A: BackupApi> VaultCleaner<A> {
    pub fn new(api: A, wait: WaitPolicy) -> Self {
        Self { api, wait }
    }
}

#[async_trait]
impl<A: BackupApi> Cleaner for VaultCleaner<A> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::BackupVaults
    }

    async fn find(&self, pattern: &str) -> Result<Vec<String>> {
        let vaults = self.api.list_vaults().await?;
        Ok(self.kind().name_match().select(vaults, pattern))
    }

    async fn remove(&self, vault: &str, _pattern: &str) -> Result<()> {
        let points = self.api.list_recovery_points(vault).await?;
        for arn in &points {
            tracing::info!(vault, recovery_point = %arn, "Deleting recovery point");
            self.api.delete_recovery_point(vault, arn).await?;
        }

        if !points.is_empty() {
            let what = format!("recovery points in {}", vault);
            wait_until(self.wait, &what, move || async move {
                Ok(self.api.list_recovery_points(vault).await?.is_empty())
            })
            .await?;
        }

        self.api.delete_vault(vault).await
    }
}
