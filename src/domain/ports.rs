use crate::domain::model::VoteResource;
use crate::domain::results::ResultsDocument;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 供使用者顯示的完整路徑
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn dataset_id(&self) -> &str;
    fn language(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn headers(&self) -> HashMap<String, String>;
}

/// Source of the vote catalogue and of the per-vote result documents.
#[async_trait]
pub trait VoteSource: Send + Sync {
    async fn fetch_catalogue(&self) -> Result<Vec<VoteResource>>;
    async fn fetch_results(&self, download_url: &str) -> Result<ResultsDocument>;
}
