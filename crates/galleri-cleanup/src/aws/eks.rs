use async_trait::async_trait;
use aws_sdk_eks::error::DisplayErrorContext;
use aws_sdk_eks::Client;

use crate::api::EksApi;
use crate::error::{CleanupError, Result};

pub struct AwsEks {
    client: Client,
}

impl AwsEks {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl EksApi for AwsEks {
    async fn list_clusters(&self) -> Result<Vec<String>> {
        let mut clusters = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .list_clusters()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| CleanupError::api("ListClusters", "*", DisplayErrorContext(&e)))?;

            clusters.extend(page.clusters().iter().cloned());

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(clusters)
    }

    async fn list_nodegroups(&self, cluster: &str) -> Result<Vec<String>> {
        let mut nodegroups = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .list_nodegroups()
                .cluster_name(cluster)
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| CleanupError::api("ListNodegroups", cluster, DisplayErrorContext(&e)))?;

            nodegroups.extend(page.nodegroups().iter().cloned());

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(nodegroups)
    }

    async fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> Result<()> {
        self.client
            .delete_nodegroup()
            .cluster_name(cluster)
            .nodegroup_name(nodegroup)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteNodegroup", nodegroup, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn delete_cluster(&self, cluster: &str) -> Result<()> {
        self.client
            .delete_cluster()
            .name(cluster)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteCluster", cluster, DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn cluster_exists(&self, cluster: &str) -> Result<bool> {
        match self.client.describe_cluster().name(cluster).send().await {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|service| service.is_resource_not_found_exception()) =>
            {
                Ok(false)
            }
            Err(e) => Err(CleanupError::api(
                "DescribeCluster",
                cluster,
                DisplayErrorContext(&e),
            )),
        }
    }
}
