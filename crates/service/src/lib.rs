//! Storage layer owning the blog post data file.
//! - Separates persistence from the web handlers.
//! - Reuses record definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod store_api;

pub use storage::blog_store::BlogStore;
pub use store_api::PostStore;
