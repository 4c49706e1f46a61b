use crate::domain::model::{BatchResult, SourceDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_dir(&self) -> &str;
    fn input_extensions(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Bundle the output files into a single zip archive.
    fn archive_output(&self) -> bool;
    fn skills_file(&self) -> Option<&str>;
    fn workers(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceDocument>>;
    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<BatchResult>;
    async fn load(&self, result: BatchResult) -> Result<String>;
}
