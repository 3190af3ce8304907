use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{FlagReason, Page};

use crate::error::{ok, ok_with_message, ApiResult, Envelope};
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;
use crate::views::{author_directory, PostView};

const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlagRequest {
    #[serde(default)]
    pub reason: FlagReason,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagResponse {
    pub flag_count: u64,
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Query(query): Query<PostListQuery>,
) -> ApiResult<Json<Envelope<Page<PostView>>>> {
    let page = crate::extract::PageQuery { page: query.page, limit: query.limit }
        .to_request(DEFAULT_PAGE_SIZE)?;
    let posts = state
        .board
        .list_posts(&caller, page, query.include_inactive)
        .await?;
    let names = author_directory(state.accounts.as_ref(), &posts.items).await?;
    Ok(ok(posts.map(|post| PostView::render(post, &names))))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> ApiResult<Json<Envelope<PostView>>> {
    let post = state
        .board
        .create_post(&author, &req.content, req.anonymous)
        .await?;
    let names: std::collections::HashMap<_, _> = std::iter::once((author.id, author)).collect();
    Ok(ok_with_message(
        PostView::render(post, &names),
        "Post created successfully",
    ))
}

pub async fn reply(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    Path(post_id): Path<Uuid>,
    ApiJson(req): ApiJson<ReplyRequest>,
) -> ApiResult<Json<Envelope<PostView>>> {
    let post = state
        .board
        .reply(&author, post_id, &req.content, req.anonymous)
        .await?;
    let names = author_directory(state.accounts.as_ref(), std::slice::from_ref(&post)).await?;
    Ok(ok_with_message(
        PostView::render(post, &names),
        "Reply added successfully",
    ))
}

pub async fn flag(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(post_id): Path<Uuid>,
    ApiJson(req): ApiJson<FlagRequest>,
) -> ApiResult<Json<Envelope<FlagResponse>>> {
    let flag_count = state.board.flag(&caller, post_id, req.reason).await?;
    Ok(ok_with_message(
        FlagResponse { flag_count },
        "Post flagged successfully",
    ))
}

pub async fn my_posts(
    State(state): State<AppState>,
    AuthUser(author): AuthUser,
    Query(query): Query<crate::extract::PageQuery>,
) -> ApiResult<Json<Envelope<Page<PostView>>>> {
    let page = query.to_request(DEFAULT_PAGE_SIZE)?;
    let posts = state.board.my_posts(&author, page).await?;
    let names = author_directory(state.accounts.as_ref(), &posts.items).await?;
    Ok(ok(posts.map(|post| PostView::render(post, &names))))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Json<Envelope<()>>> {
    state.board.delete_post(&actor, post_id).await?;
    Ok(ok_with_message((), "Post deleted successfully"))
}
