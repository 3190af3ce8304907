//! Request extractors: JSON bodies with enveloped rejections, bearer-token
//! authentication, and the admin gate.

use axum::extract::{FromRef, FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use domains::{Account, DomainError, PageRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// `axum::Json` with malformed bodies reported through the standard
/// failure envelope instead of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(DomainError::Validation(rejection.body_text()).into()),
        }
    }
}

/// The authenticated account behind the request's bearer token.
pub struct AuthUser(pub Account);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| {
                DomainError::Unauthorized("Access denied. No token provided.".into())
            })?;

        let claims = state.tokens.decode(token)?;
        let account = state
            .accounts
            .get(claims.account_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Access denied. Invalid token.".into()))?;

        if account.is_banned() {
            return Err(DomainError::Forbidden("Access denied. User is banned.".into()).into());
        }
        if !account.is_active {
            return Err(DomainError::Unauthorized(
                "Account is deactivated. Please contact support.".into(),
            )
            .into());
        }
        Ok(AuthUser(account))
    }
}

/// `AuthUser` plus the admin-role gate.
pub struct AdminUser(pub Account);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(account) = AuthUser::from_request_parts(parts, state).await?;
        if !account.is_admin() {
            return Err(
                DomainError::Forbidden("Access denied. Admin privileges required.".into()).into(),
            );
        }
        Ok(AdminUser(account))
    }
}

/// `?page=&limit=` pair shared by the listing endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn to_request(self, default_limit: u64) -> Result<PageRequest, ApiError> {
        Ok(PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(default_limit),
        )?)
    }
}
