use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::Client;

use crate::api::LogsApi;
use crate::error::{CleanupError, Result};

pub struct AwsLogs {
    client: Client,
}

impl AwsLogs {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl LogsApi for AwsLogs {
    async fn list_log_groups(&self) -> Result<Vec<String>> {
        let mut groups = Vec::new();
        let mut next_token = None;
        loop {
            let page = self
                .client
                .describe_log_groups()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| CleanupError::api("DescribeLogGroups", "*", DisplayErrorContext(&e)))?;

            groups.extend(
                page.log_groups()
                    .iter()
                    .filter_map(|group| group.log_group_name().map(str::to_string)),
            );

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(groups)
    }

    async fn delete_log_group(&self, name: &str) -> Result<()> {
        self.client
            .delete_log_group()
            .log_group_name(name)
            .send()
            .await
            .map_err(|e| CleanupError::api("DeleteLogGroup", name, DisplayErrorContext(&e)))?;
        Ok(())
    }
}
