use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    DomainError, DomainResult, Flag, Page, PageRequest, Post, PostRepo, PostStats, Reply,
};

use super::paginate;

/// Community board store. Each post document carries its replies and
/// flags, so `add_reply`/`add_flag` run under one entry lock and the
/// duplicate-flag check cannot race.
#[derive(Default)]
pub struct MemoryPostRepo {
    docs: DashMap<Uuid, Post>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted(&self, mut keep: impl FnMut(&Post) -> bool) -> Vec<Post> {
        let mut matches: Vec<Post> = self
            .docs
            .iter()
            .filter(|doc| keep(doc))
            .map(|doc| doc.clone())
            .collect();
        matches.sort_by_key(|p| Reverse(p.created_at));
        matches
    }
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn insert(&self, post: Post) -> DomainResult<()> {
        self.docs.insert(post.id, post);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Post>> {
        Ok(self.docs.get(&id).map(|doc| doc.clone()))
    }

    async fn save(&self, post: Post) -> DomainResult<()> {
        match self.docs.get_mut(&post.id) {
            Some(mut doc) => {
                *doc = post;
                Ok(())
            }
            None => Err(DomainError::not_found("Post")),
        }
    }

    async fn add_reply(&self, post_id: Uuid, reply: Reply) -> DomainResult<Post> {
        let mut doc = self
            .docs
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::not_found("Post"))?;
        doc.add_reply(reply)?;
        Ok(doc.clone())
    }

    async fn add_flag(&self, post_id: Uuid, flag: Flag) -> DomainResult<u64> {
        let mut doc = self
            .docs
            .get_mut(&post_id)
            .ok_or_else(|| DomainError::not_found("Post"))?;
        doc.add_flag(flag)
    }

    async fn list(&self, include_inactive: bool, page: PageRequest) -> DomainResult<Page<Post>> {
        let matches = self.collect_sorted(|p| include_inactive || p.is_active);
        Ok(paginate(matches, page))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> DomainResult<Page<Post>> {
        let matches = self.collect_sorted(|p| p.author_id == author_id);
        Ok(paginate(matches, page))
    }

    async fn list_flagged(&self, min_flags: u64, page: PageRequest) -> DomainResult<Page<Post>> {
        let mut matches = self.collect_sorted(|p| p.is_active && p.flag_count > min_flags);
        matches.sort_by(|a, b| {
            b.flag_count
                .cmp(&a.flag_count)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(paginate(matches, page))
    }

    async fn top_flagged(&self, limit: usize) -> DomainResult<Vec<Post>> {
        let mut matches = self.collect_sorted(|p| p.is_active && p.flag_count > 0);
        matches.sort_by(|a, b| b.flag_count.cmp(&a.flag_count));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn stats(&self, since: DateTime<Utc>) -> DomainResult<PostStats> {
        let mut stats = PostStats::default();
        for doc in self.docs.iter() {
            stats.total += 1;
            if doc.is_active {
                stats.active += 1;
                if doc.flag_count > 0 {
                    stats.flagged += 1;
                }
            }
            if doc.created_at >= since {
                stats.new_in_window += 1;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use domains::FlagReason;

    #[tokio::test]
    async fn add_flag_is_atomic_under_concurrent_callers() {
        let repo = Arc::new(MemoryPostRepo::new());
        let post = Post::new(Uuid::now_v7(), "content".into(), false);
        let post_id = post.id;
        repo.insert(post).await.unwrap();

        let user_a = Uuid::now_v7();
        let user_b = Uuid::now_v7();

        // Two distinct users flag at the same instant: both must land,
        // exactly once each.
        let mut handles = Vec::new();
        for user in [user_a, user_b, user_a, user_b] {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.add_flag(post_id, Flag::new(user, FlagReason::Spam)).await
            }));
        }

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DomainError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(ok, 2);
        assert_eq!(conflicts, 2);

        let stored = repo.get(post_id).await.unwrap().unwrap();
        assert_eq!(stored.flag_count, 2);
        assert_eq!(stored.flags.len(), 2);
    }

    #[tokio::test]
    async fn list_excludes_inactive_unless_asked() {
        let repo = MemoryPostRepo::new();
        let mut hidden = Post::new(Uuid::now_v7(), "hidden".into(), false);
        hidden.soft_delete();
        repo.insert(hidden).await.unwrap();
        repo.insert(Post::new(Uuid::now_v7(), "visible".into(), false))
            .await
            .unwrap();

        let visible = repo.list(false, PageRequest::default()).await.unwrap();
        assert_eq!(visible.total_items, 1);

        let all = repo.list(true, PageRequest::default()).await.unwrap();
        assert_eq!(all.total_items, 2);
    }

    #[tokio::test]
    async fn flagged_listing_orders_by_flag_count() {
        let repo = MemoryPostRepo::new();
        let mut one = Post::new(Uuid::now_v7(), "one flag".into(), false);
        one.add_flag(Flag::new(Uuid::now_v7(), FlagReason::Other)).unwrap();
        let mut three = Post::new(Uuid::now_v7(), "three flags".into(), false);
        for _ in 0..3 {
            three.add_flag(Flag::new(Uuid::now_v7(), FlagReason::Abuse)).unwrap();
        }
        repo.insert(one).await.unwrap();
        repo.insert(three.clone()).await.unwrap();

        let page = repo.list_flagged(0, PageRequest::default()).await.unwrap();
        assert_eq!(page.items[0].id, three.id);

        let top = repo.top_flagged(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, three.id);
    }
}
