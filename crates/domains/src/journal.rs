//! Private per-user mood-tagged journal entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_JOURNAL_CONTENT_LEN: usize = 5000;
pub const MAX_JOURNAL_TITLE_LEN: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    VeryBad,
    Bad,
    #[default]
    Neutral,
    Good,
    VeryGood,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::VeryBad,
        Mood::Bad,
        Mood::Neutral,
        Mood::Good,
        Mood::VeryGood,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    /// Stored lowercased.
    pub tags: Vec<String>,
    /// Journals are always private; kept explicit for the wire format.
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(
        user_id: Uuid,
        date: DateTime<Utc>,
        title: Option<String>,
        content: String,
        mood: Mood,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            date,
            title: title.unwrap_or_else(|| Self::default_title(date)),
            content,
            mood,
            tags: normalize_tags(tags),
            is_private: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn default_title(date: DateTime<Utc>) -> String {
        format!("Journal Entry - {}", date.format("%Y-%m-%d"))
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Trims, lowercases, and drops empty tags.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Per-mood entry counts with the kebab-case bucket names on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoodCounts {
    #[serde(rename = "very-bad")]
    pub very_bad: u64,
    pub bad: u64,
    pub neutral: u64,
    pub good: u64,
    #[serde(rename = "very-good")]
    pub very_good: u64,
}

impl MoodCounts {
    pub fn record(&mut self, mood: Mood) {
        match mood {
            Mood::VeryBad => self.very_bad += 1,
            Mood::Bad => self.bad += 1,
            Mood::Neutral => self.neutral += 1,
            Mood::Good => self.good += 1,
            Mood::VeryGood => self.very_good += 1,
        }
    }

    pub fn get(&self, mood: Mood) -> u64 {
        match mood {
            Mood::VeryBad => self.very_bad,
            Mood::Bad => self.bad,
            Mood::Neutral => self.neutral,
            Mood::Good => self.good,
            Mood::VeryGood => self.very_good,
        }
    }
}

/// Aggregation over one owner's entries; all-zero defaults when empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: u64,
    pub mood_counts: MoodCounts,
    pub first_entry: Option<DateTime<Utc>>,
    pub last_entry: Option<DateTime<Utc>>,
}

/// Filter for the owner's journal listing.
#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    pub mood: Option<Mood>,
    /// Case-insensitive match over title, content, and tags.
    pub search: Option<String>,
}

impl JournalFilter {
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(mood) = self.mood {
            if entry.mood != mood {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_tags = entry.tags.iter().any(|t| t.contains(&needle));
            if !entry.title.to_lowercase().contains(&needle)
                && !entry.content.to_lowercase().contains(&needle)
                && !in_tags
            {
                return false;
            }
        }
        true
    }
}
