//! Storage abstractions for the service layer
//!
//! Contains the file-backed blog post store and its cache. The store
//! persists the full post collection as one pretty-printed JSON array.

pub mod blog_store;
pub mod post_cache;
