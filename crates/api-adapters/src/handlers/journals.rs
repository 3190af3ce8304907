use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use domains::{JournalEntry, JournalFilter, JournalStats, Mood, Page};
use services::{JournalUpdate, NewJournalEntry};

use crate::error::{ok, ok_with_message, ApiResult, Envelope};
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJournalRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct JournalListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub mood: Option<Mood>,
    pub search: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    ApiJson(req): ApiJson<CreateJournalRequest>,
) -> ApiResult<Json<Envelope<JournalEntry>>> {
    let entry = state
        .journals
        .create(
            &owner,
            NewJournalEntry {
                title: req.title,
                content: req.content,
                mood: req.mood,
                tags: req.tags,
                date: req.date,
            },
        )
        .await?;
    Ok(ok_with_message(entry, "Journal entry created successfully"))
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Query(query): Query<JournalListQuery>,
) -> ApiResult<Json<Envelope<Page<JournalEntry>>>> {
    let page = crate::extract::PageQuery { page: query.page, limit: query.limit }
        .to_request(DEFAULT_PAGE_SIZE)?;
    let filter = JournalFilter { mood: query.mood, search: query.search };
    Ok(ok(state.journals.list(&owner, filter, page).await?))
}

pub async fn stats(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
) -> ApiResult<Json<Envelope<JournalStats>>> {
    Ok(ok(state.journals.stats(&owner).await?))
}

pub async fn get(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<JournalEntry>>> {
    Ok(ok(state.journals.get(&owner, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateJournalRequest>,
) -> ApiResult<Json<Envelope<JournalEntry>>> {
    let entry = state
        .journals
        .update(
            &owner,
            id,
            JournalUpdate {
                title: req.title,
                content: req.content,
                mood: req.mood,
                tags: req.tags,
            },
        )
        .await?;
    Ok(ok_with_message(entry, "Journal entry updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<()>>> {
    state.journals.delete(&owner, id).await?;
    Ok(ok_with_message((), "Journal entry deleted successfully"))
}
