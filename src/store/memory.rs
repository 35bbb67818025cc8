use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Post, User};

/// In-memory store with the same observable semantics as the MongoDB
/// backend. Used when no MONGO_URI is configured, which is how local
/// development and the integration tests run.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user(email: &str) -> User {
        User::new(
            "test".to_string(),
            email.to_string(),
            "hash".to_string(),
            "avatar".to_string(),
        )
    }

    #[tokio::test]
    async fn find_user_by_email_and_id() {
        let store = MemoryStore::new();
        let u = user("a@example.com");
        store.insert_user(&u).await.unwrap();

        let by_email = store.find_user_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, u.id);

        let by_id = store.find_user_by_id(u.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "a@example.com");

        assert!(store.find_user_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let store = MemoryStore::new();
        let author = user("a@example.com");

        let mut p1 = Post::new(&author, "one".to_string());
        let mut p2 = Post::new(&author, "two".to_string());
        let mut p3 = Post::new(&author, "three".to_string());
        let base = Utc::now();
        p1.date = base - Duration::seconds(2);
        p2.date = base - Duration::seconds(1);
        p3.date = base;

        // Insert out of creation order; listing must still sort by date.
        store.insert_post(&p2).await.unwrap();
        store.insert_post(&p3).await.unwrap();
        store.insert_post(&p1).await.unwrap();

        let listed = store.list_posts().await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn save_post_replaces_document() {
        let store = MemoryStore::new();
        let author = user("a@example.com");
        let mut post = Post::new(&author, "original".to_string());
        store.insert_post(&post).await.unwrap();

        post.add_like(author.id);
        store.save_post(&post).await.unwrap();

        let found = store.find_post(post.id).await.unwrap().unwrap();
        assert_eq!(found.likes.len(), 1);
    }

    #[tokio::test]
    async fn delete_post_reports_missing() {
        let store = MemoryStore::new();
        let author = user("a@example.com");
        let post = Post::new(&author, "gone".to_string());
        store.insert_post(&post).await.unwrap();

        assert!(store.delete_post(post.id).await.unwrap());
        assert!(!store.delete_post(post.id).await.unwrap());
        assert!(store.find_post(post.id).await.unwrap().is_none());
    }
}
