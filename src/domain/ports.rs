use crate::domain::model::{TeamExtraction, TeamReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn team_ids(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64 {
        30
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<TeamExtraction>>;
    async fn transform(&self, teams: Vec<TeamExtraction>) -> Result<Vec<TeamReport>>;
    async fn load(&self, reports: Vec<TeamReport>) -> Result<String>;
}
