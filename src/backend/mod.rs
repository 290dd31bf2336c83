use async_trait::async_trait;

use crate::{dto::products::ProductDraft, error::AppResult, models::Product};

pub mod local;
pub mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

/// Storage strategy behind [`crate::client::ProductApi`].
///
/// Drafts arrive already validated. Not-found is reported through `Option`
/// and `bool`, never as an error.
#[async_trait]
pub trait ProductBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn get(&self, id: &str) -> AppResult<Option<Product>>;

    async fn create(&self, draft: ProductDraft) -> AppResult<Product>;

    async fn update(&self, id: &str, draft: ProductDraft) -> AppResult<Option<Product>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;
}
