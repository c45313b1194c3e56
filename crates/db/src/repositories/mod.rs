//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod content_repo;
pub mod topic_repo;

pub use category_repo::CategoryRepo;
pub use content_repo::ContentRepo;
pub use topic_repo::TopicRepo;
