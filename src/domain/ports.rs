use crate::utils::error::Result;
use async_trait::async_trait;

/// File access rooted at one directory. Paths passed in are relative to that root.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Names of the regular files directly under the root ending in `suffix`, sorted.
    fn list_files(
        &self,
        suffix: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    /// Creates the root directory if it does not exist yet.
    fn create_root(&self) -> impl std::future::Future<Output = Result<()>> + Send;
    fn location(&self) -> String;
}

/// Settings the uploader needs to reach the tolling API.
pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn api_url(&self) -> &str;
    fn map_provider(&self) -> &str;
    fn vehicle_type(&self) -> &str;
    fn concurrency(&self) -> usize;
    fn timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Vec<Self::Input>>;
    async fn transform(&self, data: Vec<Self::Input>) -> Result<Self::Output>;
    async fn load(&self, result: Self::Output) -> Result<String>;
}
