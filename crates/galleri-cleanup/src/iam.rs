// Customer-managed IAM policies
//
// A policy must be detached from every user, role and group and have no
// versions besides its default before IAM will delete it.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::IamApi;
use crate::error::{CleanupError, Result};
use crate::{Cleaner, ResourceKind};

pub struct IamPolicyCleaner<A> {
    api: A,
    /// Name to ARN for policies seen by the last `find`.
    arns: Mutex<HashMap<String, String>>,
}

impl<A: IamApi> IamPolicyCleaner<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            arns: Mutex::new(HashMap::new()),
        }
    }

    async fn arn_of(&self, name: &str) -> Result<String> {
        let cached = self.arns.lock().get(name).cloned();
        if let Some(arn) = cached {
            return Ok(arn);
        }
        self.api
            .list_local_policies()
            .await?
            .into_iter()
            .find(|policy| policy.name == name)
            .map(|policy| policy.arn)
            .ok_or_else(|| CleanupError::api("ListPolicies", name, "policy not found"))
    }
}

#[async_trait]
impl<A: IamApi> Cleaner for IamPolicyCleaner<A> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::IamPolicies
    }

    async fn find(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = self.kind().name_match();
        let matched: Vec<_> = self
            .api
            .list_local_policies()
            .await?
            .into_iter()
            .filter(|policy| matcher.matches(&policy.name, pattern))
            .collect();

        let mut arns = self.arns.lock();
        arns.clear();
        let mut names = Vec::with_capacity(matched.len());
        for policy in matched {
            names.push(policy.name.clone());
            arns.insert(policy.name, policy.arn);
        }
        Ok(names)
    }

    async fn remove(&self, name: &str, _pattern: &str) -> Result<()> {
        let arn = self.arn_of(name).await?;

        let attachments = self.api.list_attachments(&arn).await?;
        for user in &attachments.users {
            tracing::info!(policy = name, user = %user, "Detaching policy");
            self.api.detach_user(user, &arn).await?;
        }
        for role in &attachments.roles {
            tracing::info!(policy = name, role = %role, "Detaching policy");
            self.api.detach_role(role, &arn).await?;
        }
        for group in &attachments.groups {
            tracing::info!(policy = name, group = %group, "Detaching policy");
            self.api.detach_group(group, &arn).await?;
        }

        for version in self.api.list_policy_versions(&arn).await? {
            if !version.is_default {
                tracing::info!(policy = name, version = %version.id, "Deleting policy version");
                self.api.delete_policy_version(&arn, &version.id).await?;
            }
        }

        self.api.delete_policy(&arn).await
    }
}
