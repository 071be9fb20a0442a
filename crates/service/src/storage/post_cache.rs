use models::Post;
use tokio::sync::RwLock;

/// In-memory copy of the full post collection.
///
/// Two states only: empty until the first successful read populates it, and
/// cleared again by every successful write. It is never partially updated.
/// The lock guards the slot itself, not read-modify-write cycles over the
/// data file.
pub struct PostCache {
    slot: RwLock<Option<Vec<Post>>>,
}

impl PostCache {
    /// Start empty; the first read fills the cache.
    pub fn new() -> Self {
        Self { slot: RwLock::new(None) }
    }

    /// Clone of the cached collection, or `None` when unpopulated.
    pub async fn snapshot(&self) -> Option<Vec<Post>> {
        self.slot.read().await.clone()
    }

    /// Replace the cache contents after a successful read.
    pub async fn populate(&self, posts: Vec<Post>) {
        *self.slot.write().await = Some(posts);
    }

    /// Drop the cached collection after a successful write.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.is_some()
    }
}

impl Default for PostCache {
    fn default() -> Self {
        Self::new()
    }
}
