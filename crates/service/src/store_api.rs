use models::{Post, PostDraft};

use crate::errors::StorageError;
use crate::storage::blog_store::BlogStore;

/// Post storage interface consumed by the web handlers.
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    async fn get_blog_posts(&self) -> Result<Vec<Post>, StorageError>;
    async fn add_blog_post(&self, draft: PostDraft) -> Result<Post, StorageError>;
    async fn get_blog_post_by_id(&self, id: u64) -> Result<Option<Post>, StorageError>;
    async fn update_blog_post(&self, id: u64, draft: PostDraft) -> Result<Option<Post>, StorageError>;
    async fn delete_blog_post(&self, id: u64) -> Result<bool, StorageError>;
}

#[async_trait::async_trait]
impl PostStore for BlogStore {
    async fn get_blog_posts(&self) -> Result<Vec<Post>, StorageError> { self.get_blog_posts().await }
    async fn add_blog_post(&self, draft: PostDraft) -> Result<Post, StorageError> { self.add_blog_post(draft).await }
    async fn get_blog_post_by_id(&self, id: u64) -> Result<Option<Post>, StorageError> { self.get_blog_post_by_id(id).await }
    async fn update_blog_post(&self, id: u64, draft: PostDraft) -> Result<Option<Post>, StorageError> { self.update_blog_post(id, draft).await }
    async fn delete_blog_post(&self, id: u64) -> Result<bool, StorageError> { self.delete_blog_post(id).await }
}
