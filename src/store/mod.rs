use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Post, User};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Persistence seam for users and posts. Handlers own the business rules;
/// a store only moves whole documents. `save_post` replaces the full
/// document without version checks, so a concurrent read-modify-write
/// pair can lose an update; that is an accepted limitation.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError>;
    /// All posts, creation date descending.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    async fn save_post(&self, post: &Post) -> Result<(), StoreError>;
    /// Returns false when the post was already gone.
    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
