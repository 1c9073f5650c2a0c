//! Comments attached to articles.
//!
//! [`CommentStore`] is the seam to whatever database backs comments in
//! production; [`MemoryCommentStore`] is a process-local implementation with
//! the same ownership rules. Only the author of a comment may edit or delete
//! it, and a rejected mutation leaves the comment untouched.
use crate::error::CommentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

pub const ANONYMOUS: &str = "Anonymous";

/// Opaque identity handed out by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> UserId {
        UserId(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: UserId,
    /// Resolved from [`Profiles`] when the comment is read.
    pub username: Option<String>,
}

impl Comment {
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(ANONYMOUS)
    }

    /// Whether `viewer` may edit or delete this comment.
    pub fn is_owned_by(&self, viewer: Option<&UserId>) -> bool {
        viewer == Some(&self.user_id)
    }
}

/// Display names for identities.
pub trait Profiles {
    fn username(&self, user: &UserId) -> Option<String>;
}

impl Profiles for HashMap<UserId, String> {
    fn username(&self, user: &UserId) -> Option<String> {
        self.get(user).cloned()
    }
}

pub trait CommentStore {
    /// Posts a comment on `article_slug`. The body is trimmed and must not be blank.
    fn create(&self, article_slug: &str, author: &UserId, content: &str)
        -> Result<Comment, CommentError>;

    /// Comments on `article_slug`, newest first.
    fn list(&self, article_slug: &str) -> Vec<Comment>;

    /// Replaces the body of comment `id` and bumps its update time.
    fn update(&self, id: Uuid, author: &UserId, content: &str) -> Result<Comment, CommentError>;

    fn delete(&self, id: Uuid, author: &UserId) -> Result<(), CommentError>;
}

#[derive(Debug, Clone)]
struct StoredComment {
    id: Uuid,
    seq: u64,
    article_slug: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: UserId,
}

#[derive(Debug, Default)]
struct Rows {
    next_seq: u64,
    comments: Vec<StoredComment>,
}

#[derive(Debug)]
pub struct MemoryCommentStore<P> {
    profiles: P,
    rows: RwLock<Rows>,
}

impl<P: Profiles> MemoryCommentStore<P> {
    pub fn new(profiles: P) -> MemoryCommentStore<P> {
        MemoryCommentStore {
            profiles,
            rows: RwLock::new(Rows::default()),
        }
    }

    fn resolve(&self, stored: &StoredComment) -> Comment {
        Comment {
            id: stored.id,
            article_slug: stored.article_slug.clone(),
            content: stored.content.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            user_id: stored.user_id.clone(),
            username: self.profiles.username(&stored.user_id),
        }
    }
}

fn checked_body(content: &str) -> Result<&str, CommentError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(CommentError::EmptyBody);
    }
    Ok(content)
}

fn check_owner(stored: &StoredComment, author: &UserId) -> Result<(), CommentError> {
    if &stored.user_id != author {
        return Err(CommentError::NotOwner {
            comment: stored.id,
            user: author.to_string(),
        });
    }
    Ok(())
}

impl<P: Profiles> CommentStore for MemoryCommentStore<P> {
    fn create(
        &self,
        article_slug: &str,
        author: &UserId,
        content: &str,
    ) -> Result<Comment, CommentError> {
        let content = checked_body(content)?;
        let now = Utc::now();

        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let stored = StoredComment {
            id: Uuid::new_v4(),
            seq: rows.next_seq,
            article_slug: article_slug.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            user_id: author.clone(),
        };
        rows.next_seq += 1;
        let comment = self.resolve(&stored);
        rows.comments.push(stored);
        Ok(comment)
    }

    fn list(&self, article_slug: &str) -> Vec<Comment> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut matching: Vec<&StoredComment> = rows
            .comments
            .iter()
            .filter(|stored| stored.article_slug == article_slug)
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        matching.into_iter().map(|stored| self.resolve(stored)).collect()
    }

    fn update(&self, id: Uuid, author: &UserId, content: &str) -> Result<Comment, CommentError> {
        let content = checked_body(content)?;

        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let stored = rows
            .comments
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or(CommentError::NotFound(id))?;
        check_owner(stored, author)?;

        stored.content = content.to_string();
        stored.updated_at = Utc::now();
        let stored = stored.clone();
        drop(rows);
        Ok(self.resolve(&stored))
    }

    fn delete(&self, id: Uuid, author: &UserId) -> Result<(), CommentError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let index = rows
            .comments
            .iter()
            .position(|stored| stored.id == id)
            .ok_or(CommentError::NotFound(id))?;
        check_owner(&rows.comments[index], author)?;
        rows.comments.remove(index);
        Ok(())
    }
}
