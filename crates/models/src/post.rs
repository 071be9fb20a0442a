use serde::{Deserialize, Serialize};

/// Blog post record as persisted in the data file.
/// Ids are positive and assigned monotonically by the store; display order
/// is insertion order, so the collection is kept as an ordered sequence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
}

/// Create/update input: no `id`, the store assigns identity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDraft {
    pub author: String,
    pub title: String,
    pub content: String,
}

impl Post {
    /// The single post written when no data file exists yet.
    pub fn seed() -> Self {
        Self {
            id: 1,
            author: "John Doe".to_string(),
            title: "Default Post".to_string(),
            content: "This is a post from default data.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_post_has_id_one() {
        let seed = Post::seed();
        assert_eq!(seed.id, 1);
        assert!(!seed.title.is_empty());
    }

    #[test]
    fn post_serializes_with_expected_fields() {
        let post = Post { id: 2, author: "Jane Doe".into(), title: "Another Post".into(), content: "More content here.".into() };
        let value = serde_json::to_value(&post).expect("serialize");
        assert_eq!(value["id"], 2);
        assert_eq!(value["author"], "Jane Doe");
        assert_eq!(value["title"], "Another Post");
        assert_eq!(value["content"], "More content here.");
    }
}
