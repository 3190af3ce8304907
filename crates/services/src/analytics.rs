//! Platform-wide analytics for the admin console.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use domains::{AccountRepo, DomainResult, JournalRepo, Post, PostRepo, TherapistRepo};

const ACTIVITY_WINDOW_DAYS: i64 = 30;
const TOP_FLAGGED_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_users: u64,
    pub active_users: u64,
    pub banned_users: u64,
    pub admin_users: u64,
    pub therapist_users: u64,
    pub total_posts: u64,
    pub active_posts: u64,
    pub flagged_posts: u64,
    pub total_journals: u64,
    pub total_therapists: u64,
    pub verified_therapists: u64,
    pub pending_therapists: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub new_users_last_30_days: u64,
    pub new_posts_last_30_days: u64,
    pub new_journals_last_30_days: u64,
    pub new_therapists_last_30_days: u64,
}

/// Condensed view of a heavily flagged post for the alerts panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedPostAlert {
    pub id: Uuid,
    pub content: String,
    pub flag_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for FlaggedPostAlert {
    fn from(post: Post) -> Self {
        let mut content = post.content;
        if let Some((cut, _)) = content.char_indices().nth(100) {
            content.truncate(cut);
        }
        Self {
            id: post.id,
            content,
            flag_count: post.flag_count,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alerts {
    pub top_flagged_posts: Vec<FlaggedPostAlert>,
    pub pending_verifications: u64,
    pub banned_users: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalytics {
    pub overview: AnalyticsOverview,
    pub recent_activity: RecentActivity,
    pub alerts: Alerts,
}

pub struct AnalyticsService {
    accounts: Arc<dyn AccountRepo>,
    posts: Arc<dyn PostRepo>,
    journals: Arc<dyn JournalRepo>,
    therapists: Arc<dyn TherapistRepo>,
}

impl AnalyticsService {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        posts: Arc<dyn PostRepo>,
        journals: Arc<dyn JournalRepo>,
        therapists: Arc<dyn TherapistRepo>,
    ) -> Self {
        Self { accounts, posts, journals, therapists }
    }

    pub async fn platform_analytics(&self) -> DomainResult<PlatformAnalytics> {
        let since = Utc::now() - Duration::days(ACTIVITY_WINDOW_DAYS);

        let (accounts, posts, journal_total, journal_recent, therapists, top_flagged) = tokio::try_join!(
            self.accounts.stats(since),
            self.posts.stats(since),
            self.journals.count(None),
            self.journals.count(Some(since)),
            self.therapists.stats(since),
            self.posts.top_flagged(TOP_FLAGGED_LIMIT),
        )?;

        Ok(PlatformAnalytics {
            overview: AnalyticsOverview {
                total_users: accounts.total,
                active_users: accounts.active,
                banned_users: accounts.banned,
                admin_users: accounts.admins,
                therapist_users: accounts.therapists,
                total_posts: posts.total,
                active_posts: posts.active,
                flagged_posts: posts.flagged,
                total_journals: journal_total,
                total_therapists: therapists.total,
                verified_therapists: therapists.verified,
                pending_therapists: therapists.pending,
            },
            recent_activity: RecentActivity {
                new_users_last_30_days: accounts.new_in_window,
                new_posts_last_30_days: posts.new_in_window,
                new_journals_last_30_days: journal_recent,
                new_therapists_last_30_days: therapists.new_in_window,
            },
            alerts: Alerts {
                top_flagged_posts: top_flagged.into_iter().map(Into::into).collect(),
                pending_verifications: therapists.pending,
                banned_users: accounts.banned,
            },
        })
    }
}
