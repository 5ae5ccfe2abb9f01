use crate::domain::model::{ReportBundle, ReportPaths, RepositoryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn username(&self) -> &str;
    fn token(&self) -> &str;
    fn page_size(&self) -> u32;
    fn request_timeout(&self) -> Duration;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RepositoryRecord>>;
    async fn transform(&self, repos: Vec<RepositoryRecord>) -> Result<ReportBundle>;
    async fn load(&self, bundle: ReportBundle) -> Result<ReportPaths>;
}
