use std::path::PathBuf;
use std::sync::Arc;

use models::{Post, PostDraft};
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::storage::post_cache::PostCache;

/// JSON file-backed store for the blog post collection.
///
/// Owns the data file path and a lazily-populated [`PostCache`]. The file
/// handle is scoped to each read/write call; nothing is held across calls.
/// Single-writer, single-process usage is assumed: mutations read a
/// snapshot, modify it, then persist the whole collection, so overlapping
/// writers can race on id assignment or clobber each other's write.
pub struct BlogStore {
    data_path: PathBuf,
    cache: PostCache,
}

impl BlogStore {
    /// Initialize the store for the given data file path. The file itself is
    /// created lazily on first read (seeded with the default post).
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StorageError> {
        let data_path = path.into();
        if let Some(parent) = data_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        Ok(Arc::new(Self { data_path, cache: PostCache::new() }))
    }

    /// Full ordered post collection.
    ///
    /// Cache hit returns without touching the disk. A missing data file is
    /// seeded with the default post and persisted before returning.
    pub async fn get_blog_posts(&self) -> Result<Vec<Post>, StorageError> {
        if let Some(posts) = self.cache.snapshot().await {
            debug!(count = posts.len(), "cache hit for blog posts");
            return Ok(posts);
        }

        let posts = if fs::metadata(&self.data_path).await.is_err() {
            let seed = vec![Post::seed()];
            warn!(path = %self.data_path.display(), "data file missing; seeding default blog posts");
            self.save_blog_posts(&seed).await?;
            seed
        } else {
            self.load_from_disk().await?
        };

        self.cache.populate(posts.clone()).await;
        Ok(posts)
    }

    /// Serialize the given collection to the data file (pretty-printed),
    /// overwriting prior contents. Invalidates the cache on success
    /// regardless of its prior state.
    pub async fn save_blog_posts(&self, posts: &[Post]) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(posts)
            .map_err(|e| StorageError::DataFile(format!("cannot serialize posts: {e}")))?;
        fs::write(&self.data_path, data)
            .await
            .map_err(|e| StorageError::DataFile(format!("cannot write {}: {}", self.data_path.display(), e)))?;
        self.cache.invalidate().await;
        Ok(())
    }

    /// Append a new post with the next id (max existing + 1, or 1 when the
    /// collection is empty) and persist the full collection.
    pub async fn add_blog_post(&self, draft: PostDraft) -> Result<Post, StorageError> {
        let mut posts = self.get_blog_posts().await?;
        let next_id = posts.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
        let post = Post {
            id: next_id,
            author: draft.author,
            title: draft.title,
            content: draft.content,
        };
        posts.push(post.clone());
        self.save_blog_posts(&posts).await?;
        Ok(post)
    }

    /// Remove the post with the given id; returns whether one existed.
    /// A miss performs no write.
    pub async fn delete_blog_post(&self, id: u64) -> Result<bool, StorageError> {
        let mut posts = self.get_blog_posts().await?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() < before {
            self.save_blog_posts(&posts).await?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// First post matching the id, or `None`. Absence is not an error.
    pub async fn get_blog_post_by_id(&self, id: u64) -> Result<Option<Post>, StorageError> {
        Ok(self.get_blog_posts().await?.into_iter().find(|p| p.id == id))
    }

    /// Overwrite author/title/content of the post with the given id and
    /// persist. Returns `None` without writing when no post matches.
    pub async fn update_blog_post(&self, id: u64, draft: PostDraft) -> Result<Option<Post>, StorageError> {
        let mut posts = self.get_blog_posts().await?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.author = draft.author;
        post.title = draft.title;
        post.content = draft.content;
        let updated = post.clone();
        self.save_blog_posts(&posts).await?;
        Ok(Some(updated))
    }

    /// Read and validate the data file. Shape is checked before the typed
    /// decode so a non-list top level or a record without an `id` field is
    /// reported as a format error, not a decode failure.
    async fn load_from_disk(&self) -> Result<Vec<Post>, StorageError> {
        let bytes = fs::read(&self.data_path)
            .await
            .map_err(|e| StorageError::DataFile(format!("cannot read {}: {}", self.data_path.display(), e)))?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::DataFormat(format!("invalid JSON in {}: {}", self.data_path.display(), e)))?;
        let items = value
            .as_array()
            .ok_or_else(|| StorageError::DataFormat("top-level JSON value is not a list of posts".into()))?;
        for (idx, item) in items.iter().enumerate() {
            let record = item
                .as_object()
                .ok_or_else(|| StorageError::DataFormat(format!("post record {idx} is not an object")))?;
            if !record.contains_key("id") {
                return Err(StorageError::DataFormat(format!("post record {idx} has no id field")));
            }
        }
        serde_json::from_value(value)
            .map_err(|e| StorageError::DataFormat(format!("post records malformed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("blog_store_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn seeds_default_post_when_file_missing() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;

        let posts = store.get_blog_posts().await?;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0], Post::seed());

        // file was created with the seed content
        let on_disk: Vec<Post> = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(on_disk, posts);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn add_assigns_max_plus_one() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        let existing = Post { id: 5, author: "A".into(), title: "T".into(), content: "C".into() };
        store.save_blog_posts(&[existing]).await?;

        let draft = PostDraft { author: "A".into(), title: "T".into(), content: "C".into() };
        let created = store.add_blog_post(draft).await?;
        assert_eq!(created.id, 6);

        let posts = store.get_blog_posts().await?;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1], created);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn add_on_empty_collection_assigns_one() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        store.save_blog_posts(&[]).await?;

        let draft = PostDraft { author: "Jane Doe".into(), title: "First".into(), content: "hello".into() };
        let created = store.add_blog_post(draft).await?;
        assert_eq!(created.id, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_id_is_noop() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        let before = store.get_blog_posts().await?;

        assert!(!store.delete_blog_post(99).await?);
        assert_eq!(store.get_blog_posts().await?, before);

        // stored file unchanged too
        let on_disk: Vec<Post> = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(on_disk, before);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_existing_id_persists() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        store.get_blog_posts().await?;

        assert!(store.delete_blog_post(1).await?);
        assert!(store.get_blog_posts().await?.is_empty());

        // survives a reload from disk
        let store2 = BlogStore::new(&tmp).await?;
        assert!(store2.get_blog_posts().await?.is_empty());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_returns_none_without_write() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        let before = store.get_blog_posts().await?;

        let draft = PostDraft { author: "x".into(), title: "y".into(), content: "z".into() };
        assert!(store.update_blog_post(42, draft).await?.is_none());

        let on_disk: Vec<Post> = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert_eq!(on_disk, before);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_fields_in_place() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        store.get_blog_posts().await?;

        let draft = PostDraft { author: "Jane Doe".into(), title: "Edited".into(), content: "new content".into() };
        let updated = store.update_blog_post(1, draft).await?.expect("post exists");
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "Edited");

        let posts = store.get_blog_posts().await?;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0], updated);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn lookup_by_id_reports_absence_as_none() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;

        assert!(store.get_blog_post_by_id(1).await?.is_some());
        assert!(store.get_blog_post_by_id(2).await?.is_none());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_then_get_round_trips() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        let posts = vec![
            Post { id: 1, author: "John Doe".into(), title: "My First Post".into(), content: "This is the content of my first post.".into() },
            Post { id: 2, author: "Jane Doe".into(), title: "Another Post".into(), content: "More content here.".into() },
        ];

        store.save_blog_posts(&posts).await?;
        assert_eq!(store.get_blog_posts().await?, posts);

        // save(get()) then get yields the same collection
        let loaded = store.get_blog_posts().await?;
        store.save_blog_posts(&loaded).await?;
        assert_eq!(store.get_blog_posts().await?, posts);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn cache_hit_skips_disk_and_write_invalidates() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        let store = BlogStore::new(&tmp).await?;
        let seeded = store.get_blog_posts().await?;

        // rewrite the file behind the store's back: the populated cache wins
        let other = vec![Post { id: 7, author: "n".into(), title: "n".into(), content: "n".into() }];
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&other)?).await?;
        assert_eq!(store.get_blog_posts().await?, seeded);

        // a write through the store invalidates, so the next read hits disk
        store.save_blog_posts(&other).await?;
        assert_eq!(store.get_blog_posts().await?, other);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_data_format_error() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        tokio::fs::write(&tmp, b"{not json").await?;
        let store = BlogStore::new(&tmp).await?;

        assert!(matches!(store.get_blog_posts().await, Err(StorageError::DataFormat(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn non_list_top_level_is_data_format_error() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        tokio::fs::write(&tmp, br#"{"id": 1, "author": "a"}"#).await?;
        let store = BlogStore::new(&tmp).await?;

        assert!(matches!(store.get_blog_posts().await, Err(StorageError::DataFormat(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn record_without_id_is_data_format_error() -> Result<(), anyhow::Error> {
        let tmp = temp_path();
        tokio::fs::write(&tmp, br#"[{"author": "a", "title": "t", "content": "c"}]"#).await?;
        let store = BlogStore::new(&tmp).await?;

        assert!(matches!(store.get_blog_posts().await, Err(StorageError::DataFormat(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_path_is_data_file_error() -> Result<(), anyhow::Error> {
        // a directory at the data path exists but cannot be read as a file
        let tmp = std::env::temp_dir().join(format!("blog_store_dir_{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&tmp).await?;
        let store = BlogStore::new(&tmp).await?;

        assert!(matches!(store.get_blog_posts().await, Err(StorageError::DataFile(_))));

        let _ = tokio::fs::remove_dir(&tmp).await;
        Ok(())
    }
}
