use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;

use crate::api::{ObjectId, S3Api};
use crate::error::{CleanupError, Result};

pub struct AwsS3 {
    client: Client,
}

impl AwsS3 {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl S3Api for AwsS3 {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| CleanupError::api("ListBuckets", "*", DisplayErrorContext(&e)))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }

    async fn list_object_versions(&self, bucket: &str) -> Result<Vec<ObjectId>> {
        let mut objects = Vec::new();
        let mut key_marker = None;
        let mut version_id_marker = None;
        loop {
            let page = self
                .client
                .list_object_versions()
                .bucket(bucket)
                .set_key_marker(key_marker)
                .set_version_id_marker(version_id_marker)
                .send()
                .await
                .map_err(|e| CleanupError::api("ListObjectVersions", bucket, DisplayErrorContext(&e)))?;

            objects.extend(page.versions().iter().filter_map(|version| {
                Some(ObjectId {
                    key: version.key()?.to_string(),
                    version_id: version.version_id().map(str::to_string),
                })
            }));
            objects.extend(page.delete_markers().iter().filter_map(|marker| {
                Some(ObjectId {
                    key: marker.key()?.to_string(),
                    version_id: marker.version_id().map(str::to_string),
                })
            }));

            key_marker = page.next_key_marker().map(str::to_string);
            version_id_marker = page.next_version_id_marker().map(str::to_string);
            if key_marker.is_none() {
                break;
            }
        }
        Ok(objects)
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token = None;
        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(continuation_token)
                .send()
                .await
                .map_err(|e| CleanupError::api("ListObjectsV2", bucket, DisplayErrorContext(&e)))?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            continuation_token = page.next_continuation_token().map(str::to_string);
            if continuation_token.is_none() {
                break;
            }
        }
        Ok(keys)
    }

    async fn delete_objects(&self, bucket: &str, objects: &[ObjectId]) -> Result<()> {
        if objects.is_empty() {
            return Ok(());
        }

        let identifiers = objects
            .iter()
            .map(|object| {
                ObjectIdentifier::builder()
                    .key(&object.key)
                    .set_version_id(object.version_id.clone())
                    .build()
                    .map_err(|e| CleanupError::api("DeleteObjects", &object.key, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let delete = Delete::builder()
            .set_objects(Some(identifiers))
            .quiet(true)
            .build()
            .map_err(|e| CleanupError::api("DeleteObjects", bucket, e))?;

        let output = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteObjects", bucket, DisplayErrorContext(&e)))?;

        if let Some(failed) = output.errors().first() {
            return Err(CleanupError::api(
                "DeleteObjects",
                format!("{}/{}", bucket, failed.key().unwrap_or_default()),
                format!(
                    "{} {} ({} keys not deleted)",
                    failed.code().unwrap_or_default(),
                    failed.message().unwrap_or_default(),
                    output.errors().len()
                ),
            ));
        }
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteBucket", bucket, DisplayErrorContext(&e)))?;
        Ok(())
    }
}
