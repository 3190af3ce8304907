use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use domains::{Account, AccountFilter, BanStatus, Page, Role};
use services::PlatformAnalytics;

use crate::error::{ok, ok_with_message, ApiResult, Envelope};
use crate::extract::{AdminUser, ApiJson};
use crate::state::AppState;
use crate::views::{author_directory, PostView};

const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub role: Option<Role>,
    pub status: Option<BanStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub min_flags: u64,
}

#[derive(Debug, Deserialize)]
pub struct ReasonBody {
    pub reason: String,
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<Envelope<Page<Account>>>> {
    let page = crate::extract::PageQuery { page: query.page, limit: query.limit }
        .to_request(DEFAULT_PAGE_SIZE)?;
    let filter = AccountFilter {
        role: query.role,
        ban_status: query.status,
        search: query.search,
    };
    Ok(ok(state.moderation.list_accounts(filter, page).await?))
}

pub async fn ban_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
    ApiJson(body): ApiJson<ReasonBody>,
) -> ApiResult<Json<Envelope<Account>>> {
    let account = state.moderation.ban(&admin, user_id, &body.reason).await?;
    Ok(ok_with_message(account, "User banned successfully"))
}

pub async fn unban_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Account>>> {
    let account = state.moderation.unban(&admin, user_id).await?;
    Ok(ok_with_message(account, "User unbanned successfully"))
}

pub async fn flagged_posts(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Query(query): Query<FlaggedQuery>,
) -> ApiResult<Json<Envelope<Page<PostView>>>> {
    let page = crate::extract::PageQuery { page: query.page, limit: query.limit }
        .to_request(DEFAULT_PAGE_SIZE)?;
    let posts = state.moderation.flagged_posts(query.min_flags, page).await?;
    let names = author_directory(state.accounts.as_ref(), &posts.items).await?;
    Ok(ok(posts.map(|post| PostView::render_for_admin(post, &names))))
}

pub async fn remove_post(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(post_id): Path<Uuid>,
    ApiJson(body): ApiJson<ReasonBody>,
) -> ApiResult<Json<Envelope<PostView>>> {
    let post = state
        .moderation
        .remove_post(&admin, post_id, &body.reason)
        .await?;
    let names = author_directory(state.accounts.as_ref(), std::slice::from_ref(&post)).await?;
    Ok(ok_with_message(
        PostView::render_for_admin(post, &names),
        "Post removed successfully",
    ))
}

pub async fn restore_post(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Json<Envelope<PostView>>> {
    let post = state.moderation.restore_post(&admin, post_id).await?;
    let names = author_directory(state.accounts.as_ref(), std::slice::from_ref(&post)).await?;
    Ok(ok_with_message(
        PostView::render_for_admin(post, &names),
        "Post restored successfully",
    ))
}

pub async fn analytics(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Envelope<PlatformAnalytics>>> {
    Ok(ok(state.analytics.platform_analytics().await?))
}
