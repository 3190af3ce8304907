use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use domains::{
    Account, Address, Certification, ContactDetails, ContactRequest, DomainResult, Education,
    Page, PracticeInfo, TherapistFilter, TherapistProfile,
};
use services::{ApplicationContact, TherapistApplication};

use crate::error::{ok, ok_with_message, ApiResult, Envelope};
use crate::extract::{AdminUser, ApiJson, AuthUser};
use crate::state::AppState;
use crate::views::PublicTherapistView;

const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct TherapistListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub specialization: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyContactInfo {
    pub email: String,
    pub phone: String,
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub specialization: Vec<String>,
    pub license_number: String,
    pub experience: u32,
    pub education: Option<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub contact_info: ApplyContactInfo,
    pub practice_info: Option<PracticeInfo>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    pub message: String,
    #[serde(default)]
    pub contact_info: ContactDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub approved: bool,
    pub rejection_reason: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(query): Query<TherapistListQuery>,
) -> ApiResult<Json<Envelope<Page<PublicTherapistView>>>> {
    let page = crate::extract::PageQuery { page: query.page, limit: query.limit }
        .to_request(DEFAULT_PAGE_SIZE)?;
    let filter = TherapistFilter { specialization: query.specialization };
    let profiles = state.therapists.list_verified(filter, page).await?;
    let names = account_directory(&state, &profiles.items).await?;
    Ok(ok(profiles.map(|profile| PublicTherapistView::render(profile, &names))))
}

pub async fn get(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<PublicTherapistView>>> {
    let profile = state.therapists.get(id).await?;
    let names = account_directory(&state, std::slice::from_ref(&profile)).await?;
    Ok(ok(PublicTherapistView::render(profile, &names)))
}

pub async fn apply(
    State(state): State<AppState>,
    AuthUser(applicant): AuthUser,
    ApiJson(req): ApiJson<ApplyRequest>,
) -> ApiResult<Json<Envelope<TherapistProfile>>> {
    let profile = state
        .therapists
        .apply(
            &applicant,
            TherapistApplication {
                specialization: req.specialization,
                license_number: req.license_number,
                experience: req.experience,
                education: req.education,
                certifications: req.certifications,
                contact_info: ApplicationContact {
                    email: req.contact_info.email,
                    phone: req.contact_info.phone,
                    address: req.contact_info.address,
                },
                practice_info: req.practice_info,
                bio: req.bio,
            },
        )
        .await?;
    Ok(ok_with_message(
        profile,
        "Therapist application submitted successfully",
    ))
}

pub async fn contact(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(therapist_id): Path<Uuid>,
    ApiJson(req): ApiJson<ContactBody>,
) -> ApiResult<Json<Envelope<()>>> {
    state
        .therapists
        .contact(&caller, therapist_id, &req.message, req.contact_info)
        .await?;
    Ok(ok_with_message((), "Contact request sent successfully"))
}

/// The calling therapist's inbound contact requests, newest first.
pub async fn my_requests(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<Envelope<Vec<ContactRequest>>>> {
    Ok(ok(state.therapists.my_requests(&caller).await?))
}

/// Admin review queue, oldest application first.
pub async fn pending(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Envelope<Vec<TherapistProfile>>>> {
    Ok(ok(state.therapists.list_pending().await?))
}

pub async fn verify(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(therapist_id): Path<Uuid>,
    ApiJson(req): ApiJson<VerifyRequest>,
) -> ApiResult<Json<Envelope<TherapistProfile>>> {
    let profile = state
        .therapists
        .decide(&admin, therapist_id, req.approved, req.rejection_reason)
        .await?;
    let message = if req.approved {
        "Therapist application approved successfully"
    } else {
        "Therapist application rejected successfully"
    };
    Ok(ok_with_message(profile, message))
}

async fn account_directory(
    state: &AppState,
    profiles: &[TherapistProfile],
) -> DomainResult<HashMap<Uuid, Account>> {
    let mut names = HashMap::with_capacity(profiles.len());
    for profile in profiles {
        if let Some(account) = state.accounts.get(profile.user_id).await? {
            names.insert(profile.user_id, account);
        }
    }
    Ok(names)
}
