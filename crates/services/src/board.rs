//! Community board use cases.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use domains::{
    Account, DomainError, DomainResult, Flag, FlagReason, Page, PageRequest, Post, PostRepo,
    Reply, MAX_POST_LEN, MAX_REPLY_LEN,
};

pub struct BoardService {
    posts: Arc<dyn PostRepo>,
}

impl BoardService {
    pub fn new(posts: Arc<dyn PostRepo>) -> Self {
        Self { posts }
    }

    pub async fn create_post(
        &self,
        author: &Account,
        content: &str,
        anonymous: bool,
    ) -> DomainResult<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("Post content is required".into()));
        }
        if content.chars().count() > MAX_POST_LEN {
            return Err(DomainError::Validation(
                "Post content cannot exceed 2000 characters".into(),
            ));
        }

        let post = Post::new(author.id, content.to_string(), anonymous);
        self.posts.insert(post.clone()).await?;
        info!(post = %post.id, anonymous, "post created");
        Ok(post)
    }

    /// Newest-first page of posts. Soft-deleted posts are visible only to
    /// admins who ask for them.
    pub async fn list_posts(
        &self,
        caller: &Account,
        page: PageRequest,
        include_inactive: bool,
    ) -> DomainResult<Page<Post>> {
        let include_inactive = include_inactive && caller.is_admin();
        self.posts.list(include_inactive, page).await
    }

    pub async fn my_posts(&self, author: &Account, page: PageRequest) -> DomainResult<Page<Post>> {
        self.posts.list_by_author(author.id, page).await
    }

    pub async fn reply(
        &self,
        author: &Account,
        post_id: Uuid,
        content: &str,
        anonymous: bool,
    ) -> DomainResult<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("Reply content is required".into()));
        }
        if content.chars().count() > MAX_REPLY_LEN {
            return Err(DomainError::Validation(
                "Reply content cannot exceed 1000 characters".into(),
            ));
        }

        self.posts
            .add_reply(post_id, Reply::new(author.id, content.to_string(), anonymous))
            .await
    }

    /// Returns the post's new flag count.
    pub async fn flag(
        &self,
        user: &Account,
        post_id: Uuid,
        reason: FlagReason,
    ) -> DomainResult<u64> {
        let count = self.posts.add_flag(post_id, Flag::new(user.id, reason)).await?;
        info!(post = %post_id, count, "post flagged");
        Ok(count)
    }

    /// Author-or-admin soft delete.
    pub async fn delete_post(&self, actor: &Account, post_id: Uuid) -> DomainResult<()> {
        let mut post = self
            .posts
            .get(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post"))?;
        if !actor.is_admin() && post.author_id != actor.id {
            return Err(DomainError::Forbidden(
                "Not authorized to delete this post".into(),
            ));
        }
        post.soft_delete();
        self.posts.save(post).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockPostRepo, RoleProfile};

    fn user() -> Account {
        Account::new("U".into(), "u@example.com".into(), "h".into(), RoleProfile::User)
    }

    #[tokio::test]
    async fn post_content_is_length_checked() {
        let svc = BoardService::new(Arc::new(MockPostRepo::new()));
        let author = user();

        let err = svc.create_post(&author, "   ", false).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let long = "x".repeat(MAX_POST_LEN + 1);
        let err = svc.create_post(&author, &long, false).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn non_admin_listing_never_includes_inactive() {
        let mut posts = MockPostRepo::new();
        posts
            .expect_list()
            .withf(|include_inactive, _| !include_inactive)
            .returning(|_, page| Ok(Page::new(vec![], 0, page)));
        let svc = BoardService::new(Arc::new(posts));

        svc.list_posts(&user(), PageRequest::default(), true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_requires_author_or_admin() {
        let author = user();
        let stranger = user();
        let post = Post::new(author.id, "hello".into(), false);

        let mut posts = MockPostRepo::new();
        let stored = post.clone();
        posts.expect_get().returning(move |_| Ok(Some(stored.clone())));
        let svc = BoardService::new(Arc::new(posts));

        let err = svc.delete_post(&stranger, post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
