//! Community board models: posts with nested replies and per-user flags.
//!
//! `flag_count`/`reply_count` are denormalized for the moderation listings;
//! every mutator re-derives them from the collection length so they can
//! never drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

pub const MAX_POST_LEN: usize = 2000;
pub const MAX_REPLY_LEN: usize = 1000;
pub const MAX_REMOVAL_REASON_LEN: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagReason {
    Spam,
    Abuse,
    Inappropriate,
    #[default]
    Other,
}

/// A user-submitted report against a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub user_id: Uuid,
    pub reason: FlagReason,
    pub flagged_at: DateTime<Utc>,
}

impl Flag {
    pub fn new(user_id: Uuid, reason: FlagReason) -> Self {
        Self {
            user_id,
            reason,
            flagged_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    pub fn new(author_id: Uuid, content: String, anonymous: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            content,
            author_id,
            anonymous,
            created_at: Utc::now(),
        }
    }
}

/// Admin-moderation metadata, present while a post is removed by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Removal {
    pub removed_by: Uuid,
    pub removed_at: DateTime<Utc>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub anonymous: bool,
    pub replies: Vec<Reply>,
    pub flags: Vec<Flag>,
    pub flag_count: u64,
    pub reply_count: u64,
    pub is_active: bool,
    pub removal: Option<Removal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: Uuid, content: String, anonymous: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            content,
            author_id,
            anonymous,
            replies: Vec::new(),
            flags: Vec::new(),
            flag_count: 0,
            reply_count: 0,
            is_active: true,
            removal: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_user_flagged(&self, user_id: Uuid) -> bool {
        self.flags.iter().any(|f| f.user_id == user_id)
    }

    /// Appends a reply. Fails on inactive posts.
    pub fn add_reply(&mut self, reply: Reply) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::Conflict(
                "Cannot reply to inactive post".into(),
            ));
        }
        self.replies.push(reply);
        self.reply_count = self.replies.len() as u64;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Appends a flag; a given user may flag a post at most once.
    /// Returns the new flag count.
    pub fn add_flag(&mut self, flag: Flag) -> DomainResult<u64> {
        if self.has_user_flagged(flag.user_id) {
            return Err(DomainError::Conflict(
                "You have already flagged this post".into(),
            ));
        }
        self.flags.push(flag);
        self.flag_count = self.flags.len() as u64;
        self.updated_at = Utc::now();
        Ok(self.flag_count)
    }

    /// Author/admin soft delete. Idempotent by design: the author deleting
    /// an already-removed post is not an error.
    pub fn soft_delete(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Admin-moderation removal with an audit trail.
    pub fn remove(&mut self, admin_id: Uuid, reason: String) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::Conflict("Post is already removed".into()));
        }
        self.is_active = false;
        self.removal = Some(Removal {
            removed_by: admin_id,
            removed_at: Utc::now(),
            reason,
        });
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reactivates a removed post and clears the removal metadata.
    pub fn restore(&mut self) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::Conflict("Post is not removed".into()));
        }
        self.is_active = true;
        self.removal = None;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Aggregated counts the admin analytics view reports for posts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub total: u64,
    pub active: u64,
    pub flagged: u64,
    pub new_in_window: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_collection_sizes() {
        let mut post = Post::new(Uuid::now_v7(), "hello".into(), false);
        post.add_reply(Reply::new(Uuid::now_v7(), "hi".into(), false))
            .unwrap();
        post.add_flag(Flag::new(Uuid::now_v7(), FlagReason::Spam))
            .unwrap();

        assert_eq!(post.reply_count, post.replies.len() as u64);
        assert_eq!(post.flag_count, post.flags.len() as u64);
    }

    #[test]
    fn same_user_cannot_flag_twice() {
        let mut post = Post::new(Uuid::now_v7(), "hello".into(), false);
        let user = Uuid::now_v7();

        assert_eq!(post.add_flag(Flag::new(user, FlagReason::Spam)).unwrap(), 1);
        assert!(matches!(
            post.add_flag(Flag::new(user, FlagReason::Abuse)),
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(post.flag_count, 1);
    }

    #[test]
    fn no_replies_on_inactive_posts() {
        let mut post = Post::new(Uuid::now_v7(), "hello".into(), false);
        post.soft_delete();
        assert!(matches!(
            post.add_reply(Reply::new(Uuid::now_v7(), "hi".into(), false)),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn remove_restore_round_trip() {
        let mut post = Post::new(Uuid::now_v7(), "hello".into(), false);
        let admin = Uuid::now_v7();

        post.remove(admin, "policy violation".into()).unwrap();
        assert!(!post.is_active);
        assert_eq!(post.removal.as_ref().unwrap().removed_by, admin);
        assert!(matches!(
            post.remove(admin, "again".into()),
            Err(DomainError::Conflict(_))
        ));

        post.restore().unwrap();
        assert!(post.is_active);
        assert!(post.removal.is_none());
        assert!(matches!(post.restore(), Err(DomainError::Conflict(_))));
    }
}
