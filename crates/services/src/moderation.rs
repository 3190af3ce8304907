//! Admin moderation: account bans and board post removal.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use domains::{
    Account, AccountFilter, AccountRepo, DomainError, DomainResult, Page, PageRequest, Post,
    PostRepo, MAX_BAN_REASON_LEN, MAX_REMOVAL_REASON_LEN,
};

pub struct ModerationService {
    accounts: Arc<dyn AccountRepo>,
    posts: Arc<dyn PostRepo>,
}

impl ModerationService {
    pub fn new(accounts: Arc<dyn AccountRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { accounts, posts }
    }

    pub async fn list_accounts(
        &self,
        filter: AccountFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Account>> {
        self.accounts.list(filter, page).await
    }

    /// Bans a user. Admins are never bannable, and an admin cannot ban
    /// their own account.
    pub async fn ban(&self, admin: &Account, user_id: Uuid, reason: &str) -> DomainResult<Account> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::Validation("Ban reason is required".into()));
        }
        if reason.chars().count() > MAX_BAN_REASON_LEN {
            return Err(DomainError::Validation(
                "Ban reason cannot exceed 500 characters".into(),
            ));
        }

        let mut account = self
            .accounts
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        if account.is_admin() {
            return Err(DomainError::Forbidden("Cannot ban admin users".into()));
        }
        if account.id == admin.id {
            return Err(DomainError::Forbidden("Cannot ban yourself".into()));
        }

        account.apply_ban(admin.id, reason.to_string())?;
        self.accounts.save(account.clone()).await?;
        info!(user = %user_id, admin = %admin.id, "user banned");
        Ok(account)
    }

    pub async fn unban(&self, admin: &Account, user_id: Uuid) -> DomainResult<Account> {
        let mut account = self
            .accounts
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        account.lift_ban()?;
        self.accounts.save(account.clone()).await?;
        info!(user = %user_id, admin = %admin.id, "user unbanned");
        Ok(account)
    }

    /// Active posts at or above the flag threshold, most-flagged first.
    pub async fn flagged_posts(
        &self,
        min_flags: u64,
        page: PageRequest,
    ) -> DomainResult<Page<Post>> {
        self.posts.list_flagged(min_flags, page).await
    }

    pub async fn remove_post(
        &self,
        admin: &Account,
        post_id: Uuid,
        reason: &str,
    ) -> DomainResult<Post> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::Validation("Removal reason is required".into()));
        }
        if reason.chars().count() > MAX_REMOVAL_REASON_LEN {
            return Err(DomainError::Validation(
                "Removal reason cannot exceed 500 characters".into(),
            ));
        }

        let mut post = self
            .posts
            .get(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post"))?;
        post.remove(admin.id, reason.to_string())?;
        self.posts.save(post.clone()).await?;
        info!(post = %post_id, admin = %admin.id, "post removed");
        Ok(post)
    }

    pub async fn restore_post(&self, admin: &Account, post_id: Uuid) -> DomainResult<Post> {
        let mut post = self
            .posts
            .get(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post"))?;
        post.restore()?;
        self.posts.save(post.clone()).await?;
        info!(post = %post_id, admin = %admin.id, "post restored");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockAccountRepo, MockPostRepo, RoleProfile};

    fn admin() -> Account {
        Account::new("A".into(), "a@example.com".into(), "h".into(), RoleProfile::Admin)
    }

    fn user() -> Account {
        Account::new("U".into(), "u@example.com".into(), "h".into(), RoleProfile::User)
    }

    fn service(accounts: MockAccountRepo, posts: MockPostRepo) -> ModerationService {
        ModerationService::new(Arc::new(accounts), Arc::new(posts))
    }

    #[tokio::test]
    async fn ban_requires_a_reason() {
        let svc = service(MockAccountRepo::new(), MockPostRepo::new());
        let err = svc.ban(&admin(), Uuid::now_v7(), "  ").await.unwrap_err();
        assert_eq!(err, DomainError::Validation("Ban reason is required".into()));
    }

    #[tokio::test]
    async fn admins_cannot_be_banned() {
        let target = admin();
        let id = target.id;

        let mut accounts = MockAccountRepo::new();
        accounts.expect_get().returning(move |_| Ok(Some(target.clone())));
        let svc = service(accounts, MockPostRepo::new());

        let err = svc.ban(&admin(), id, "spam").await.unwrap_err();
        assert_eq!(err, DomainError::Forbidden("Cannot ban admin users".into()));
    }

    #[tokio::test]
    async fn banning_an_already_banned_user_conflicts() {
        let moderator = admin();
        let mut target = user();
        target.apply_ban(moderator.id, "first".into()).unwrap();
        let id = target.id;

        let mut accounts = MockAccountRepo::new();
        accounts.expect_get().returning(move |_| Ok(Some(target.clone())));
        let svc = service(accounts, MockPostRepo::new());

        let err = svc.ban(&moderator, id, "again").await.unwrap_err();
        assert_eq!(err, DomainError::Conflict("User is already banned".into()));
    }

    #[tokio::test]
    async fn unbanning_an_active_user_conflicts() {
        let target = user();
        let id = target.id;

        let mut accounts = MockAccountRepo::new();
        accounts.expect_get().returning(move |_| Ok(Some(target.clone())));
        let svc = service(accounts, MockPostRepo::new());

        let err = svc.unban(&admin(), id).await.unwrap_err();
        assert_eq!(err, DomainError::Conflict("User is not banned".into()));
    }

    #[tokio::test]
    async fn removal_requires_a_reason() {
        let svc = service(MockAccountRepo::new(), MockPostRepo::new());
        let err = svc
            .remove_post(&admin(), Uuid::now_v7(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
