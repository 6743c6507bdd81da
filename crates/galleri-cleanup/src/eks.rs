// EKS clusters
//
// Node groups carrying the same prefix are deleted first. The cluster is
// only deleted once it has no node groups at all, since EKS refuses to
// delete a cluster that still has any.

use async_trait::async_trait;

use crate::api::EksApi;
use crate::error::Result;
use crate::wait::{wait_until, WaitPolicy};
use crate::{Cleaner, NameMatch, ResourceKind};

pub struct EksCleaner<A> {
    api: A,
    wait: WaitPolicy,
}

impl<A: EksApi> EksCleaner<A> {
    pub fn new(api: A, wait: WaitPolicy) -> Self {
        Self { api, wait }
    }
}

#[async_trait]
impl<A: EksApi> Cleaner for EksCleaner<A> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Eks
    }

    async fn find(&self, pattern: &str) -> Result<Vec<String>> {
        let clusters = self.api.list_clusters().await?;
        Ok(self.kind().name_match().select(clusters, pattern))
    }

    async fn remove(&self, cluster: &str, pattern: &str) -> Result<()> {
        let nodegroups =
            NameMatch::Prefix.select(self.api.list_nodegroups(cluster).await?, pattern);

        for nodegroup in &nodegroups {
            tracing::info!(cluster, nodegroup = %nodegroup, "Deleting node group");
            self.api.delete_nodegroup(cluster, nodegroup).await?;
        }

        let what = format!("node groups of {}", cluster);
        wait_until(self.wait, &what, move || async move {
            Ok(self.api.list_nodegroups(cluster).await?.is_empty())
        })
        .await?;

        self.api.delete_cluster(cluster).await?;

        let what = format!("cluster {}", cluster);
        wait_until(self.wait, &what, move || async move {
            Ok(!self.api.cluster_exists(cluster).await?)
        })
        .await
    }
}
