// Administrative API seams
//
// One trait per AWS service, covering only the calls cleanup makes. The
// adapters in `crate::aws` implement them over the SDK clients; tests
// implement them in memory.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait BackupApi: Send + Sync {
    async fn list_vaults(&self) -> Result<Vec<String>>;
    /// ARNs of the recovery points held in `vault`.
    async fn list_recovery_points(&self, vault: &str) -> Result<Vec<String>>;
    async fn delete_recovery_point(&self, vault: &str, arn: &str) -> Result<()>;
    async fn delete_vault(&self, vault: &str) -> Result<()>;
}

#[async_trait]
pub trait LogsApi: Send + Sync {
    async fn list_log_groups(&self) -> Result<Vec<String>>;
    async fn delete_log_group(&self, name: &str) -> Result<()>;
}

#[async_trait]
pub trait EksApi: Send + Sync {
    async fn list_clusters(&self) -> Result<Vec<String>>;
    async fn list_nodegroups(&self, cluster: &str) -> Result<Vec<String>>;
    async fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> Result<()>;
    async fn delete_cluster(&self, cluster: &str) -> Result<()>;
    async fn cluster_exists(&self, cluster: &str) -> Result<bool>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub name: String,
    pub arn: String,
}

/// Everything a managed policy is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyAttachments {
    pub users: Vec<String>,
    pub roles: Vec<String>,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyVersion {
    pub id: String,
    pub is_default: bool,
}

#[async_trait]
pub trait IamApi: Send + Sync {
    /// Customer-managed policies only.
    async fn list_local_policies(&self) -> Result<Vec<Policy>>;
    async fn list_attachments(&self, policy_arn: &str) -> Result<PolicyAttachments>;
    async fn detach_user(&self, user: &str, policy_arn: &str) -> Result<()>;
    async fn detach_role(&self, role: &str, policy_arn: &str) -> Result<()>;
    async fn detach_group(&self, group: &str, policy_arn: &str) -> Result<()>;
    async fn list_policy_versions(&self, policy_arn: &str) -> Result<Vec<PolicyVersion>>;
    async fn delete_policy_version(&self, policy_arn: &str, version_id: &str) -> Result<()>;
    async fn delete_policy(&self, policy_arn: &str) -> Result<()>;
}

/// An object, or one version of it, or a delete marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub key: String,
    pub version_id: Option<String>,
}

#[async_trait]
pub trait S3Api: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<String>>;
    /// Every object version and delete marker in `bucket`.
    async fn list_object_versions(&self, bucket: &str) -> Result<Vec<ObjectId>>;
    /// Current object keys in `bucket`.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>>;
    async fn delete_objects(&self, bucket: &str, objects: &[ObjectId]) -> Result<()>;
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;
}
