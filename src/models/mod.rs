use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account. The password field holds the argon2 hash and is
/// only ever serialized toward the store, never in an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, avatar: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password: password_hash,
            avatar,
            date: Utc::now(),
        }
    }
}

/// User shape returned by the API: everything except the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: user.date,
        }
    }
}

/// A like is just a reference to the liking user, embedded in the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    // Author display snapshot taken at comment time.
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// A post with its likes and comments embedded, newest first. `name` and
/// `avatar` are the author's display fields snapshotted at creation; later
/// profile edits do not rewrite existing posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        }
    }

    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    /// Prepend a like for `user_id`. Callers must have checked
    /// `liked_by` first; each user holds at most one like per post.
    pub fn add_like(&mut self, user_id: Uuid) {
        self.likes.insert(0, Like { user: user_id });
    }

    /// Remove the first like held by `user_id`. Returns false when the
    /// user had no like on this post.
    pub fn remove_like(&mut self, user_id: Uuid) -> bool {
        match self.likes.iter().position(|like| like.user == user_id) {
            Some(index) => {
                self.likes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_comment(&mut self, author: &User, text: String) {
        self.comments.insert(
            0,
            Comment {
                id: Uuid::new_v4(),
                user: author.id,
                text,
                name: author.name.clone(),
                avatar: author.avatar.clone(),
                date: Utc::now(),
            },
        );
    }

    pub fn find_comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    /// Remove a comment strictly by its own id, never by the author id of
    /// some other comment. Returns false when no such comment exists.
    pub fn remove_comment(&mut self, comment_id: Uuid) -> bool {
        match self.comments.iter().position(|c| c.id == comment_id) {
            Some(index) => {
                self.comments.remove(index);
                true
            }
            None => false,
        }
    }
}
