// S3 buckets
//
// Buckets must be empty before deletion. Versioned buckets keep old versions
// and delete markers, which are removed first, then any current objects.

use async_trait::async_trait;

use crate::api::{ObjectId, S3Api};
use crate::error::Result;
use crate::{Cleaner, ResourceKind};

/// Most keys one DeleteObjects request accepts.
pub const DELETE_BATCH_LIMIT: usize = 1000;

pub struct BucketCleaner<A> {
    api: A,
}

impl<A: S3Api> BucketCleaner<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    async fn delete_all(&self, bucket: &str, objects: &[ObjectId]) -> Result<()> {
        for chunk in objects.chunks(DELETE_BATCH_LIMIT) {
            self.api.delete_objects(bucket, chunk).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<A: S3Api> Cleaner for BucketCleaner<A> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::S3Buckets
    }

    async fn find(&self, pattern: &str) -> Result<Vec<String>> {
        let buckets = self.api.list_buckets().await?;
        Ok(self.kind().name_match().select(buckets, pattern))
    }

    async fn remove(&self, bucket: &str, _pattern: &str) -> Result<()> {
        let versions = self.api.list_object_versions(bucket).await?;
        tracing::info!(bucket, versions = versions.len(), "Deleting object versions");
        self.delete_all(bucket, &versions).await?;

        let objects: Vec<ObjectId> = self
            .api
            .list_objects(bucket)
            .await?
            .into_iter()
            .map(|key| ObjectId {
                key,
                version_id: None,
            })
            .collect();
        tracing::info!(bucket, objects = objects.len(), "Deleting objects");
        self.delete_all(bucket, &objects).await?;

        self.api.delete_bucket(bucket).await
    }
}
