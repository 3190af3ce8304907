//! Role-specific dashboard summaries.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use domains::{
    Account, AccountRepo, ContactStatus, DomainError, DomainResult, JournalEntry, JournalFilter,
    JournalRepo, JournalStats, PageRequest, PostRepo, Rating, TherapistRepo, VerificationStatus,
};

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    pub journal_stats: JournalStats,
    pub recent_journals: Vec<JournalEntry>,
    pub post_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistDashboard {
    pub verification_status: VerificationStatus,
    pub verified: bool,
    pub rating: Rating,
    pub pending_requests: u64,
    pub total_requests: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_users: u64,
    pub active_users: u64,
    pub banned_users: u64,
    pub admin_users: u64,
    pub therapist_users: u64,
    pub pending_verifications: u64,
    pub recent_users: Vec<RecentUser>,
}

pub struct DashboardService {
    accounts: Arc<dyn AccountRepo>,
    posts: Arc<dyn PostRepo>,
    journals: Arc<dyn JournalRepo>,
    therapists: Arc<dyn TherapistRepo>,
}

impl DashboardService {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        posts: Arc<dyn PostRepo>,
        journals: Arc<dyn JournalRepo>,
        therapists: Arc<dyn TherapistRepo>,
    ) -> Self {
        Self { accounts, posts, journals, therapists }
    }

    pub async fn user_dashboard(&self, account: &Account) -> DomainResult<UserDashboard> {
        let page = PageRequest::new(1, RECENT_LIMIT as u64)?;
        let (stats, recent, posts) = tokio::try_join!(
            self.journals.stats_for_owner(account.id),
            self.journals
                .list_for_owner(account.id, JournalFilter::default(), page),
            self.posts.list_by_author(account.id, PageRequest::default()),
        )?;

        Ok(UserDashboard {
            journal_stats: stats,
            recent_journals: recent.items,
            post_count: posts.total_items,
        })
    }

    pub async fn therapist_dashboard(&self, account: &Account) -> DomainResult<TherapistDashboard> {
        let profile = self
            .therapists
            .find_by_user(account.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Therapist profile"))?;

        let pending = profile
            .contact_requests
            .iter()
            .filter(|r| r.status == ContactStatus::Pending)
            .count() as u64;

        Ok(TherapistDashboard {
            verification_status: profile.verification_status,
            verified: profile.verified,
            rating: profile.rating,
            pending_requests: pending,
            total_requests: profile.contact_requests.len() as u64,
        })
    }

    pub async fn admin_dashboard(&self) -> DomainResult<AdminDashboard> {
        let since = Utc::now() - Duration::days(30);
        let (accounts, therapists, recent) = tokio::try_join!(
            self.accounts.stats(since),
            self.therapists.stats(since),
            self.accounts.recent(RECENT_LIMIT),
        )?;

        Ok(AdminDashboard {
            total_users: accounts.total,
            active_users: accounts.active,
            banned_users: accounts.banned,
            admin_users: accounts.admins,
            therapist_users: accounts.therapists,
            pending_verifications: therapists.pending,
            recent_users: recent
                .into_iter()
                .map(|a| RecentUser {
                    id: a.id,
                    name: a.name.clone(),
                    email: a.email.clone(),
                    role: a.role().as_str().to_string(),
                    created_at: a.created_at,
                })
                .collect(),
        })
    }
}
