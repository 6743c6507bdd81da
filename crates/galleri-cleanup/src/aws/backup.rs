use async_trait::async_trait;
use aws_sdk_backup::error::DisplayErrorContext;
use aws_sdk_backup::Client;

use crate::api::BackupApi;
use crate::error::{CleanupError, Result};

pub struct AwsBackup {
    client: Client,
}

impl AwsBackup {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl BackupApi for AwsBackup {
    async fn list_vaults(&self) -> Result<Vec<String>> {
        let mut vaults = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .list_backup_vaults()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| CleanupError::api("ListBackupVaults", "*", DisplayErrorContext(&e)))?;

            vaults.extend(
                page.backup_vault_list()
                    .iter()
                    .filter_map(|vault| vault.backup_vault_name().map(str::to_string)),
            );

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(vaults)
    }

    async fn list_recovery_points(&self, vault: &str) -> Result<Vec<String>> {
        let mut arns = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .list_recovery_points_by_backup_vault()
                .backup_vault_name(vault)
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| {
                    CleanupError::api("ListRecoveryPointsByBackupVault", vault, DisplayErrorContext(&e))
                })?;

            arns.extend(
                page.recovery_points()
                    .iter()
                    .filter_map(|point| point.recovery_point_arn().map(str::to_string)),
            );

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(arns)
    }

    async fn delete_recovery_point(&self, vault: &str, arn: &str) -> Result<()> {
        self.client
            .delete_recovery_point()
            .backup_vault_name(vault)
            .recovery_point_arn(arn)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteRecoveryPoint", arn, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn delete_vault(&self, vault: &str) -> Result<()> {
        self.client
            .delete_backup_vault()
            .backup_vault_name(vault)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteBackupVault", vault, DisplayErrorContext(&e)))?;
        Ok(())
    }
}
