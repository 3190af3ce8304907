use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    DomainError, DomainResult, JournalEntry, JournalFilter, JournalRepo, JournalStats, Page,
    PageRequest,
};

use super::paginate;

/// Journal store; the ownership gate lives in the service, this adapter
/// only stores and aggregates.
#[derive(Default)]
pub struct MemoryJournalRepo {
    docs: DashMap<Uuid, JournalEntry>,
}

impl MemoryJournalRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalRepo for MemoryJournalRepo {
    async fn insert(&self, entry: JournalEntry) -> DomainResult<()> {
        self.docs.insert(entry.id, entry);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<JournalEntry>> {
        Ok(self.docs.get(&id).map(|doc| doc.clone()))
    }

    async fn save(&self, entry: JournalEntry) -> DomainResult<()> {
        match self.docs.get_mut(&entry.id) {
            Some(mut doc) => {
                *doc = entry;
                Ok(())
            }
            None => Err(DomainError::not_found("Journal entry")),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.docs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Journal entry"))
    }

    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        filter: JournalFilter,
        page: PageRequest,
    ) -> DomainResult<Page<JournalEntry>> {
        let mut matches: Vec<JournalEntry> = self
            .docs
            .iter()
            .filter(|doc| doc.user_id == owner_id && filter.matches(doc))
            .map(|doc| doc.clone())
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(paginate(matches, page))
    }

    async fn stats_for_owner(&self, owner_id: Uuid) -> DomainResult<JournalStats> {
        let mut stats = JournalStats::default();
        for doc in self.docs.iter().filter(|doc| doc.user_id == owner_id) {
            stats.total_entries += 1;
            stats.mood_counts.record(doc.mood);
            stats.first_entry = Some(match stats.first_entry {
                Some(first) if first <= doc.date => first,
                _ => doc.date,
            });
            stats.last_entry = Some(match stats.last_entry {
                Some(last) if last >= doc.date => last,
                _ => doc.date,
            });
        }
        Ok(stats)
    }

    async fn count(&self, since: Option<DateTime<Utc>>) -> DomainResult<u64> {
        let count = match since {
            Some(since) => self.docs.iter().filter(|d| d.created_at >= since).count(),
            None => self.docs.len(),
        };
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::Mood;

    fn entry(owner: Uuid, mood: Mood, date: &str) -> JournalEntry {
        JournalEntry::new(
            owner,
            date.parse().unwrap(),
            None,
            "entry".into(),
            mood,
            vec![],
        )
    }

    #[tokio::test]
    async fn stats_aggregate_per_owner() {
        let repo = MemoryJournalRepo::new();
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();

        repo.insert(entry(owner, Mood::Good, "2025-01-01T00:00:00Z")).await.unwrap();
        repo.insert(entry(owner, Mood::Good, "2025-02-01T00:00:00Z")).await.unwrap();
        repo.insert(entry(owner, Mood::Bad, "2025-03-01T00:00:00Z")).await.unwrap();
        repo.insert(entry(stranger, Mood::VeryGood, "2025-04-01T00:00:00Z")).await.unwrap();

        let stats = repo.stats_for_owner(owner).await.unwrap();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.mood_counts.get(Mood::Good), 2);
        assert_eq!(stats.mood_counts.get(Mood::Bad), 1);
        assert_eq!(stats.mood_counts.get(Mood::Neutral), 0);
        assert_eq!(stats.first_entry.unwrap(), "2025-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(stats.last_entry.unwrap(), "2025-03-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[tokio::test]
    async fn stats_default_to_zero_for_unknown_owner() {
        let repo = MemoryJournalRepo::new();
        let stats = repo.stats_for_owner(Uuid::now_v7()).await.unwrap();
        assert_eq!(stats.total_entries, 0);
        assert!(stats.first_entry.is_none());
        assert!(stats.last_entry.is_none());
    }

    #[tokio::test]
    async fn listing_sorts_by_date_desc() {
        let repo = MemoryJournalRepo::new();
        let owner = Uuid::now_v7();
        let old = entry(owner, Mood::Neutral, "2025-01-01T00:00:00Z");
        let new = entry(owner, Mood::Neutral, "2025-06-01T00:00:00Z");
        repo.insert(old.clone()).await.unwrap();
        repo.insert(new.clone()).await.unwrap();

        let page = repo
            .list_for_owner(owner, JournalFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items[0].id, new.id);
        assert_eq!(page.items[1].id, old.id);
    }
}
