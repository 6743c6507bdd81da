use async_trait::async_trait;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::types::PolicyScopeType;
use aws_sdk_iam::Client;

use crate::api::{IamApi, Policy, PolicyAttachments, PolicyVersion};
use crate::error::{CleanupError, Result};

pub struct AwsIam {
    client: Client,
}

impl AwsIam {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl IamApi for AwsIam {
    async fn list_local_policies(&self) -> Result<Vec<Policy>> {
        let mut policies = Vec::new();
        let mut marker = None;
        loop {
            let page = self
                .client
                .list_policies()
                .scope(PolicyScopeType::Local)
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| CleanupError::api("ListPolicies", "*", DisplayErrorContext(&e)))?;

            policies.extend(page.policies().iter().filter_map(|policy| {
                Some(Policy {
                    name: policy.policy_name()?.to_string(),
                    arn: policy.arn()?.to_string(),
                })
            }));

            marker = page.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }
        Ok(policies)
    }

    async fn list_attachments(&self, policy_arn: &str) -> Result<PolicyAttachments> {
        let mut attachments = PolicyAttachments::default();
        let mut marker = None;
        loop {
            let page = self
                .client
                .list_entities_for_policy()
                .policy_arn(policy_arn)
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| {
                    CleanupError::api("ListEntitiesForPolicy", policy_arn, DisplayErrorContext(&e))
                })?;

            attachments.users.extend(
                page.policy_users()
                    .iter()
                    .filter_map(|user| user.user_name().map(str::to_string)),
            );
            attachments.roles.extend(
                page.policy_roles()
                    .iter()
                    .filter_map(|role| role.role_name().map(str::to_string)),
            );
            attachments.groups.extend(
                page.policy_groups()
                    .iter()
                    .filter_map(|group| group.group_name().map(str::to_string)),
            );

            marker = page.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }
        Ok(attachments)
    }

    async fn detach_user(&self, user: &str, policy_arn: &str) -> Result<()> {
        self.client
            .detach_user_policy()
            .user_name(user)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| CleanupError::api("DetachUserPolicy", user, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn detach_role(&self, role: &str, policy_arn: &str) -> Result<()> {
        self.client
            .detach_role_policy()
            .role_name(role)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| CleanupError::api("DetachRolePolicy", role, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn detach_group(&self, group: &str, policy_arn: &str) -> Result<()> {
        self.client
            .detach_group_policy()
            .group_name(group)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| CleanupError::api("DetachGroupPolicy", group, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn list_policy_versions(&self, policy_arn: &str) -> Result<Vec<PolicyVersion>> {
        let mut versions = Vec::new();
        let mut marker = None;
        loop {
            let page = self
                .client
                .list_policy_versions()
                .policy_arn(policy_arn)
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| {
                    CleanupError::api("ListPolicyVersions", policy_arn, DisplayErrorContext(&e))
                })?;

            versions.extend(page.versions().iter().filter_map(|version| {
                Some(PolicyVersion {
                    id: version.version_id()?.to_string(),
                    is_default: version.is_default_version(),
                })
            }));

            marker = page.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }
        Ok(versions)
    }

    async fn delete_policy_version(&self, policy_arn: &str, version_id: &str) -> Result<()> {
        self.client
            .delete_policy_version()
            .policy_arn(policy_arn)
            .version_id(version_id)
            .send()
            .await
            .map_err(|e| {
                CleanupError::api("DeletePolicyVersion", policy_arn, DisplayErrorContext(&e))
            })?;
        Ok(())
    }

    async fn delete_policy(&self, policy_arn: &str) -> Result<()> {
        self.client
            .delete_policy()
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeletePolicy", policy_arn, DisplayErrorContext(&e)))?;
        Ok(())
    }
}
