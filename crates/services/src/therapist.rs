//! Therapist registry use cases: applications, verification decisions,
//! the public directory, and contact requests.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use domains::{
    Account, Address, Certification, ContactDetails, ContactRequest, DomainError, DomainResult,
    Education, Page, PageRequest, PracticeInfo, ProfileContact, TherapistFilter, TherapistProfile,
    TherapistRepo, MAX_BIO_LEN, MAX_CONTACT_MESSAGE_LEN,
};

#[derive(Debug, Clone)]
pub struct ApplicationContact {
    pub email: String,
    pub phone: String,
    pub address: Option<Address>,
}

/// A full registry application, richer than the credentials captured at
/// registration.
#[derive(Debug, Clone)]
pub struct TherapistApplication {
    pub specialization: Vec<String>,
    pub license_number: String,
    pub experience: u32,
    pub education: Option<Education>,
    pub certifications: Vec<Certification>,
    pub contact_info: ApplicationContact,
    pub practice_info: Option<PracticeInfo>,
    pub bio: Option<String>,
}

pub struct TherapistService {
    therapists: Arc<dyn TherapistRepo>,
}

impl TherapistService {
    pub fn new(therapists: Arc<dyn TherapistRepo>) -> Self {
        Self { therapists }
    }

    /// Files a verification application for the calling account.
    pub async fn apply(
        &self,
        applicant: &Account,
        application: TherapistApplication,
    ) -> DomainResult<TherapistProfile> {
        if let Some(existing) = self.therapists.find_by_user(applicant.id).await? {
            return Err(DomainError::Conflict(format!(
                "You already have a therapist application. Current status: {}",
                existing.verification_status
            )));
        }

        let specialization: Vec<String> = application
            .specialization
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if specialization.is_empty() {
            return Err(DomainError::Validation(
                "At least one specialization is required".into(),
            ));
        }
        let license_number = application.license_number.trim().to_string();
        if license_number.is_empty() {
            return Err(DomainError::Validation("License number is required".into()));
        }
        let contact = application.contact_info;
        if contact.email.trim().is_empty() || contact.phone.trim().is_empty() {
            return Err(DomainError::Validation(
                "Email and phone are required in contact information".into(),
            ));
        }
        if let Some(bio) = application.bio.as_deref() {
            if bio.chars().count() > MAX_BIO_LEN {
                return Err(DomainError::Validation(
                    "Bio cannot exceed 2000 characters".into(),
                ));
            }
        }

        let mut profile = TherapistProfile::new(
            applicant.id,
            specialization,
            license_number,
            application.experience,
            ProfileContact {
                email: contact.email.trim().to_string(),
                phone: contact.phone.trim().to_string(),
                address: contact.address,
            },
        );
        profile.education = application.education;
        profile.certifications = application.certifications;
        profile.practice_info = application.practice_info;
        profile.bio = application.bio;

        self.therapists.insert(profile.clone()).await?;
        info!(therapist = %profile.id, user = %profile.user_id, "therapist application filed");
        Ok(profile)
    }

    /// Public directory: verified, active profiles only.
    pub async fn list_verified(
        &self,
        filter: TherapistFilter,
        page: PageRequest,
    ) -> DomainResult<Page<TherapistProfile>> {
        self.therapists.list_verified(filter, page).await
    }

    /// A single public profile; unverified profiles are indistinguishable
    /// from missing ones to non-admin callers.
    pub async fn get(&self, id: Uuid) -> DomainResult<TherapistProfile> {
        let profile = self
            .therapists
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Therapist"))?;
        if !profile.is_listable() {
            return Err(DomainError::NotFound("Therapist not available".into()));
        }
        Ok(profile)
    }

    /// Applications awaiting review, oldest first.
    pub async fn list_pending(&self) -> DomainResult<Vec<TherapistProfile>> {
        self.therapists.list_pending().await
    }

    /// Records an admin's approve/reject decision.
    pub async fn decide(
        &self,
        admin: &Account,
        therapist_id: Uuid,
        approved: bool,
        rejection_reason: Option<String>,
    ) -> DomainResult<TherapistProfile> {
        let rejection_reason = rejection_reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        if !approved && rejection_reason.is_none() {
            return Err(DomainError::Validation(
                "Rejection reason is required when rejecting an application".into(),
            ));
        }

        let profile = self
            .therapists
            .record_decision(therapist_id, admin.id, approved, rejection_reason)
            .await?;
        info!(
            therapist = %therapist_id,
            admin = %admin.id,
            status = %profile.verification_status,
            "verification decision recorded"
        );
        Ok(profile)
    }

    /// Sends a contact request from `user` to a verified therapist.
    pub async fn contact(
        &self,
        user: &Account,
        therapist_id: Uuid,
        message: &str,
        contact_info: ContactDetails,
    ) -> DomainResult<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::Validation("Contact message is required".into()));
        }
        if message.chars().count() > MAX_CONTACT_MESSAGE_LEN {
            return Err(DomainError::Validation(
                "Contact message cannot exceed 1000 characters".into(),
            ));
        }
        if !contact_info.has_channel() {
            return Err(DomainError::Validation(
                "At least email or phone contact information is required".into(),
            ));
        }

        let profile = self
            .therapists
            .get(therapist_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Therapist"))?;
        if profile.user_id == user.id {
            return Err(DomainError::Forbidden("You cannot contact yourself".into()));
        }

        self.therapists
            .add_contact_request(
                therapist_id,
                ContactRequest::new(user.id, message.to_string(), contact_info),
            )
            .await?;
        info!(therapist = %therapist_id, user = %user.id, "contact request filed");
        Ok(())
    }

    /// Contact requests received by the calling therapist, newest first.
    pub async fn my_requests(&self, caller: &Account) -> DomainResult<Vec<ContactRequest>> {
        let profile = self
            .therapists
            .find_by_user(caller.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Therapist profile"))?;
        if !profile.verified {
            return Err(DomainError::Forbidden(
                "Your therapist profile is not verified yet".into(),
            ));
        }
        let mut requests = profile.contact_requests;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }
}
