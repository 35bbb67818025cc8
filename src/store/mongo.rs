use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database};
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Post, User};

/// MongoDB-backed store. Documents are stored whole, ids as hyphenated
/// UUID strings under `_id`, mirroring the serde wire shape.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database_name);
        // Fail at startup rather than on the first request.
        db.run_command(doc! { "ping": 1 }, None).await?;
        tracing::info!(database = database_name, "connected to MongoDB");
        Ok(Self { db })
    }

    fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    fn posts(&self) -> Collection<Post> {
        self.db.collection("posts")
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.users().insert_one(user, None).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }, None).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self
            .users()
            .find_one(doc! { "_id": id.to_string() }, None)
            .await?)
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts().insert_one(post, None).await?;
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        let cursor = self.posts().find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self
            .posts()
            .find_one(doc! { "_id": id.to_string() }, None)
            .await?)
    }

    async fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts()
            .replace_one(doc! { "_id": post.id.to_string() }, post, None)
            .await?;
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = self
            .posts()
            .delete_one(doc! { "_id": id.to_string() }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
