//! Per-owner journal CRUD and mood aggregation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use domains::{
    Account, DomainError, DomainResult, JournalEntry, JournalFilter, JournalRepo, JournalStats,
    Mood, Page, PageRequest, normalize_tags, MAX_JOURNAL_CONTENT_LEN, MAX_JOURNAL_TITLE_LEN,
};

#[derive(Debug, Clone, Default)]
pub struct NewJournalEntry {
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
    pub date: Option<DateTime<Utc>>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct JournalUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
}

pub struct JournalService {
    journals: Arc<dyn JournalRepo>,
}

impl JournalService {
    pub fn new(journals: Arc<dyn JournalRepo>) -> Self {
        Self { journals }
    }

    pub async fn create(
        &self,
        owner: &Account,
        new: NewJournalEntry,
    ) -> DomainResult<JournalEntry> {
        let content = validate_content(&new.content)?;
        let title = match new.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Some(validate_title(t)?),
            _ => None,
        };

        let entry = JournalEntry::new(
            owner.id,
            new.date.unwrap_or_else(Utc::now),
            title,
            content,
            new.mood.unwrap_or_default(),
            new.tags.unwrap_or_default(),
        );
        self.journals.insert(entry.clone()).await?;
        Ok(entry)
    }

    pub async fn list(
        &self,
        owner: &Account,
        filter: JournalFilter,
        page: PageRequest,
    ) -> DomainResult<Page<JournalEntry>> {
        self.journals.list_for_owner(owner.id, filter, page).await
    }

    pub async fn get(&self, owner: &Account, id: Uuid) -> DomainResult<JournalEntry> {
        self.owned_entry(owner, id, "access").await
    }

    pub async fn update(
        &self,
        owner: &Account,
        id: Uuid,
        update: JournalUpdate,
    ) -> DomainResult<JournalEntry> {
        let mut entry = self.owned_entry(owner, id, "update").await?;

        if let Some(content) = update.content.as_deref() {
            entry.content = validate_content(content)?;
        }
        if let Some(title) = update.title.as_deref() {
            entry.title = validate_title(title.trim())?;
        }
        if let Some(mood) = update.mood {
            entry.mood = mood;
        }
        if let Some(tags) = update.tags {
            entry.tags = normalize_tags(tags);
        }
        entry.updated_at = Utc::now();

        self.journals.save(entry.clone()).await?;
        Ok(entry)
    }

    pub async fn delete(&self, owner: &Account, id: Uuid) -> DomainResult<()> {
        self.owned_entry(owner, id, "delete").await?;
        self.journals.delete(id).await
    }

    pub async fn stats(&self, owner: &Account) -> DomainResult<JournalStats> {
        self.journals.stats_for_owner(owner.id).await
    }

    async fn owned_entry(
        &self,
        owner: &Account,
        id: Uuid,
        verb: &str,
    ) -> DomainResult<JournalEntry> {
        let entry = self
            .journals
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Journal entry"))?;
        if !entry.is_owned_by(owner.id) {
            return Err(DomainError::Forbidden(format!(
                "Not authorized to {verb} this journal entry"
            )));
        }
        Ok(entry)
    }
}

fn validate_content(content: &str) -> DomainResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation("Journal content is required".into()));
    }
    if content.chars().count() > MAX_JOURNAL_CONTENT_LEN {
        return Err(DomainError::Validation(
            "Journal content cannot exceed 5000 characters".into(),
        ));
    }
    Ok(content.to_string())
}

fn validate_title(title: &str) -> DomainResult<String> {
    if title.chars().count() > MAX_JOURNAL_TITLE_LEN {
        return Err(DomainError::Validation(
            "Title cannot be more than 100 characters".into(),
        ));
    }
    Ok(title.to_string())
}
