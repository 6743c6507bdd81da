// CloudWatch log groups

use async_trait::async_trait;

use crate::api::LogsApi;
use crate::error::Result;
use crate::{Cleaner, ResourceKind};

pub struct LogGroupCleaner<A> {
    api: A,
}

impl<A: LogsApi> LogGroupCleaner<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: LogsApi> Cleaner for LogGroupCleaner<A> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::LogGroups
    }

    async fn find(&self, pattern: &str) -> Result<Vec<String>> {
        let groups = self.api.list_log_groups().await?;
        Ok(self.kind().name_match().select(groups, pattern))
    }

    async fn remove(&self, name: &str, _pattern: &str) -> Result<()> {
        self.api.delete_log_group(name).await
    }
}
