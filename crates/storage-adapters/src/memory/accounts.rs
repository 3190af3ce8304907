use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    Account, AccountFilter, AccountRepo, AccountStats, DomainError, DomainResult, Page,
    PageRequest, Role,
};

use super::paginate;

/// Account directory with a unique-email secondary index.
#[derive(Default)]
pub struct MemoryAccountRepo {
    docs: DashMap<Uuid, Account>,
    email_index: DashMap<String, Uuid>,
}

impl MemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepo for MemoryAccountRepo {
    async fn insert(&self, account: Account) -> DomainResult<()> {
        // Claiming the email index entry first makes the uniqueness check
        // atomic with the claim.
        match self.email_index.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(
                "User already exists with this email".into(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(account.id);
                self.docs.insert(account.id, account);
                Ok(())
            }
        }
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Account>> {
        Ok(self.docs.get(&id).map(|doc| doc.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let id = match self.email_index.get(&email.to_lowercase()) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.get(id).await
    }

    async fn save(&self, account: Account) -> DomainResult<()> {
        match self.docs.get_mut(&account.id) {
            Some(mut doc) => {
                *doc = account;
                Ok(())
            }
            None => Err(DomainError::not_found("User")),
        }
    }

    async fn list(
        &self,
        filter: AccountFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Account>> {
        let mut matches: Vec<Account> = self
            .docs
            .iter()
            .filter(|doc| filter.matches(doc))
            .map(|doc| doc.clone())
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matches, page))
    }

    async fn recent(&self, limit: usize) -> DomainResult<Vec<Account>> {
        let mut all: Vec<Account> = self.docs.iter().map(|doc| doc.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }

    async fn stats(&self, since: DateTime<Utc>) -> DomainResult<AccountStats> {
        let mut stats = AccountStats::default();
        for doc in self.docs.iter() {
            stats.total += 1;
            if doc.is_active && !doc.is_banned() {
                stats.active += 1;
            }
            if doc.is_banned() {
                stats.banned += 1;
            }
            match doc.role() {
                Role::Admin => stats.admins += 1,
                Role::Therapist => stats.therapists += 1,
                Role::User => {}
            }
            if doc.created_at >= since {
                stats.new_in_window += 1;
            }
        }
        Ok(stats)
    }
}
