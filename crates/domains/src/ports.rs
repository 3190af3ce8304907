//! Port traits any adapter must implement.
//!
//! Race-sensitive mutations (`add_reply`, `add_flag`, `add_contact_request`,
//! `record_decision`) are single port calls so an adapter can execute them
//! atomically under its own document lock; two concurrent flag calls on the
//! same post must not both pass the already-flagged check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::account::{Account, AccountFilter, AccountStats, Role};
use crate::board::{Flag, Post, PostStats, Reply};
use crate::error::DomainResult;
use crate::journal::{JournalEntry, JournalFilter, JournalStats};
use crate::page::{Page, PageRequest};
use crate::therapist::{ContactRequest, TherapistFilter, TherapistProfile, TherapistStats};

/// Persistence contract for the account directory.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait AccountRepo: Send + Sync {
    /// Fails with Conflict when the email is already registered.
    async fn insert(&self, account: Account) -> DomainResult<()>;
    async fn get(&self, id: Uuid) -> DomainResult<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    /// Replaces the stored document; NotFound when the id is unknown.
    async fn save(&self, account: Account) -> DomainResult<()>;
    async fn list(&self, filter: AccountFilter, page: PageRequest) -> DomainResult<Page<Account>>;
    /// Most recently created accounts, for the admin dashboard.
    async fn recent(&self, limit: usize) -> DomainResult<Vec<Account>>;
    async fn stats(&self, since: DateTime<Utc>) -> DomainResult<AccountStats>;
}

/// Persistence contract for the community board.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn insert(&self, post: Post) -> DomainResult<()>;
    async fn get(&self, id: Uuid) -> DomainResult<Option<Post>>;
    async fn save(&self, post: Post) -> DomainResult<()>;
    /// Atomic append; Conflict when the post is inactive. Returns the
    /// updated post.
    async fn add_reply(&self, post_id: Uuid, reply: Reply) -> DomainResult<Post>;
    /// Atomic push-if-not-present; Conflict when this user already flagged
    /// the post. Returns the new flag count.
    async fn add_flag(&self, post_id: Uuid, flag: Flag) -> DomainResult<u64>;
    async fn list(&self, include_inactive: bool, page: PageRequest) -> DomainResult<Page<Post>>;
    async fn list_by_author(&self, author_id: Uuid, page: PageRequest)
        -> DomainResult<Page<Post>>;
    /// Active posts with more than `min_flags` flags, most-flagged first.
    async fn list_flagged(&self, min_flags: u64, page: PageRequest) -> DomainResult<Page<Post>>;
    async fn top_flagged(&self, limit: usize) -> DomainResult<Vec<Post>>;
    async fn stats(&self, since: DateTime<Utc>) -> DomainResult<PostStats>;
}

/// Persistence contract for the journal store.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait JournalRepo: Send + Sync {
    async fn insert(&self, entry: JournalEntry) -> DomainResult<()>;
    async fn get(&self, id: Uuid) -> DomainResult<Option<JournalEntry>>;
    async fn save(&self, entry: JournalEntry) -> DomainResult<()>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        filter: JournalFilter,
        page: PageRequest,
    ) -> DomainResult<Page<JournalEntry>>;
    async fn stats_for_owner(&self, owner_id: Uuid) -> DomainResult<JournalStats>;
    /// Total entry count, optionally restricted to a recency window.
    async fn count(&self, since: Option<DateTime<Utc>>) -> DomainResult<u64>;
}

/// Persistence contract for the therapist registry.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait TherapistRepo: Send + Sync {
    /// Fails with Conflict on a duplicate user or duplicate license number.
    async fn insert(&self, profile: TherapistProfile) -> DomainResult<()>;
    async fn get(&self, id: Uuid) -> DomainResult<Option<TherapistProfile>>;
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<TherapistProfile>>;
    /// Atomic verification transition; Conflict when already decided.
    async fn record_decision(
        &self,
        id: Uuid,
        admin_id: Uuid,
        approved: bool,
        rejection_reason: Option<String>,
    ) -> DomainResult<TherapistProfile>;
    /// Atomic append; Conflict on unavailable therapist or an existing
    /// pending request from the same user.
    async fn add_contact_request(&self, id: Uuid, request: ContactRequest) -> DomainResult<()>;
    /// Verified+active profiles, rating desc then newest first.
    async fn list_verified(
        &self,
        filter: TherapistFilter,
        page: PageRequest,
    ) -> DomainResult<Page<TherapistProfile>>;
    /// Pending applications, oldest first (FIFO review order).
    async fn list_pending(&self) -> DomainResult<Vec<TherapistProfile>>;
    async fn stats(&self, since: DateTime<Utc>) -> DomainResult<TherapistStats>;
}

/// Password hashing contract.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}

/// What a session token asserts about its bearer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub account_id: Uuid,
    pub role: Role,
}

/// Session token contract.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> DomainResult<String>;
    /// Fails with Unauthorized on an invalid or expired token.
    fn decode(&self, token: &str) -> DomainResult<TokenClaims>;
}
