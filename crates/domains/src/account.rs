//! Account directory models and the ban workflow.
//!
//! The role is a tagged union: therapist accounts carry their professional
//! credentials by construction, so a therapist without a license number is
//! unrepresentable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

pub const MAX_NAME_LEN: usize = 50;
pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_BAN_REASON_LEN: usize = 500;
pub const MAX_EXPERIENCE_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Therapist,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Therapist => "therapist",
            Role::Admin => "admin",
        }
    }
}

/// Professional fields required of every therapist-role account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistCredentials {
    pub specialization: String,
    pub license_number: String,
    pub experience: u32,
}

/// Role plus the data that role demands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    User,
    Therapist(TherapistCredentials),
    Admin,
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::User => Role::User,
            RoleProfile::Therapist(_) => Role::Therapist,
            RoleProfile::Admin => Role::Admin,
        }
    }

    pub fn credentials(&self) -> Option<&TherapistCredentials> {
        match self {
            RoleProfile::Therapist(c) => Some(c),
            _ => None,
        }
    }
}

/// Present exactly while an account is banned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRecord {
    pub banned_at: DateTime<Utc>,
    pub banned_by: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    #[serde(flatten)]
    pub role: RoleProfile,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub ban: Option<BanRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String, email: String, password_hash: String, role: RoleProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            email: email.to_lowercase(),
            password_hash,
            role,
            phone: None,
            date_of_birth: None,
            is_active: true,
            ban: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn role(&self) -> Role {
        self.role.role()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn is_banned(&self) -> bool {
        self.ban.is_some()
    }

    /// Bans the account and deactivates it. The caller-side guards
    /// (no admins, no self-ban) live in the moderation service.
    pub fn apply_ban(&mut self, admin_id: Uuid, reason: String) -> DomainResult<()> {
        if self.is_banned() {
            return Err(DomainError::Conflict("User is already banned".into()));
        }
        self.ban = Some(BanRecord {
            banned_at: Utc::now(),
            banned_by: admin_id,
            reason,
        });
        self.is_active = false;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Clears the ban record and reactivates the account.
    pub fn lift_ban(&mut self) -> DomainResult<()> {
        if !self.is_banned() {
            return Err(DomainError::Conflict("User is not banned".into()));
        }
        self.ban = None;
        self.is_active = true;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanStatus {
    Banned,
    Active,
}

/// Filter for the admin account listing.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub role: Option<Role>,
    pub ban_status: Option<BanStatus>,
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        if let Some(role) = self.role {
            if account.role() != role {
                return false;
            }
        }
        match self.ban_status {
            Some(BanStatus::Banned) if !account.is_banned() => return false,
            Some(BanStatus::Active) if account.is_banned() => return false,
            _ => {}
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !account.name.to_lowercase().contains(&needle)
                && !account.email.contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Aggregated counts the admin analytics view reports for accounts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub total: u64,
    pub active: u64,
    pub banned: u64,
    pub admins: u64,
    pub therapists: u64,
    pub new_in_window: u64,
}
