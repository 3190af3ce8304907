//! Therapist registry: profile applications, the verification state
//! machine, and inbound contact requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

pub const MAX_CONTACT_MESSAGE_LEN: usize = 1000;
pub const MAX_BIO_LEN: usize = 2000;

/// `pending → approved | rejected`; both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
    Both,
}

/// Contact details supplied by the requesting user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_method: ContactMethod,
}

impl ContactDetails {
    pub fn has_channel(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.trim().is_empty())
            || self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Acknowledged,
    Responded,
}

/// A message from a platform user to a therapist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub contact_info: ContactDetails,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

impl ContactRequest {
    pub fn new(user_id: Uuid, message: String, contact_info: ContactDetails) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            message,
            contact_info,
            status: ContactStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// The therapist's own published contact information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContact {
    pub email: String,
    pub phone: String,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeInfo {
    pub name: Option<String>,
    pub practice_type: Option<String>,
    #[serde(default)]
    pub accepts_insurance: bool,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rating {
    pub average: f32,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistProfile {
    pub id: Uuid,
    /// One profile per account.
    pub user_id: Uuid,
    pub specialization: Vec<String>,
    pub license_number: String,
    pub experience: u32,
    pub education: Option<Education>,
    pub certifications: Vec<Certification>,
    pub contact_info: ProfileContact,
    pub practice_info: Option<PracticeInfo>,
    pub bio: Option<String>,
    pub rating: Rating,
    pub verified: bool,
    pub verification_status: VerificationStatus,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub contact_requests: Vec<ContactRequest>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TherapistProfile {
    pub fn new(
        user_id: Uuid,
        specialization: Vec<String>,
        license_number: String,
        experience: u32,
        contact_info: ProfileContact,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            specialization,
            license_number,
            experience,
            education: None,
            certifications: Vec::new(),
            contact_info,
            practice_info: None,
            bio: None,
            rating: Rating::default(),
            verified: false,
            verification_status: VerificationStatus::Pending,
            verified_by: None,
            verified_at: None,
            rejection_reason: None,
            contact_requests: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verified and active profiles are the only ones shown publicly.
    pub fn is_listable(&self) -> bool {
        self.verified && self.is_active
    }

    /// Records the admin's verification decision. Only pending
    /// applications can be decided; both outcomes are terminal.
    pub fn decide(
        &mut self,
        admin_id: Uuid,
        approved: bool,
        rejection_reason: Option<String>,
    ) -> DomainResult<()> {
        if self.verification_status != VerificationStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Application has already been {}",
                self.verification_status
            )));
        }
        self.verified = approved;
        self.verification_status = if approved {
            VerificationStatus::Approved
        } else {
            VerificationStatus::Rejected
        };
        self.verified_by = Some(admin_id);
        self.verified_at = Some(Utc::now());
        if !approved {
            self.rejection_reason = rejection_reason;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Appends a contact request. A user may have at most one pending
    /// request with a given therapist at a time.
    pub fn add_contact_request(&mut self, request: ContactRequest) -> DomainResult<()> {
        if !self.is_listable() {
            return Err(DomainError::Conflict(
                "This therapist is not available for contact".into(),
            ));
        }
        let already_pending = self.contact_requests.iter().any(|r| {
            r.user_id == request.user_id && r.status == ContactStatus::Pending
        });
        if already_pending {
            return Err(DomainError::Conflict(
                "You already have a pending contact request with this therapist".into(),
            ));
        }
        self.contact_requests.push(request);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn matches_specialization(&self, wanted: &str) -> bool {
        self.specialization
            .iter()
            .any(|s| s.eq_ignore_ascii_case(wanted))
    }
}

/// Filter for the public therapist listing.
#[derive(Debug, Clone, Default)]
pub struct TherapistFilter {
    pub specialization: Option<String>,
}

/// Aggregated counts the admin analytics view reports for therapists.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    pub new_in_window: u64,
}
