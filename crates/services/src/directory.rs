//! Registration, login, and account lookup.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use domains::{
    Account, AccountRepo, DomainError, DomainResult, PasswordHasher, ProfileContact, Role,
    RoleProfile, TherapistCredentials, TherapistProfile, TherapistRepo, TokenIssuer,
    MAX_EXPERIENCE_YEARS, MAX_NAME_LEN, MIN_NAME_LEN, MIN_PASSWORD_LEN,
};

/// A new-account request, role fields included.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub experience: Option<u32>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct AuthenticatedAccount {
    pub account: Account,
    pub token: String,
}

pub struct DirectoryService {
    accounts: Arc<dyn AccountRepo>,
    therapists: Arc<dyn TherapistRepo>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl DirectoryService {
    pub fn new(
        accounts: Arc<dyn AccountRepo>,
        therapists: Arc<dyn TherapistRepo>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { accounts, therapists, hasher, tokens }
    }

    pub async fn register(&self, reg: Registration) -> DomainResult<AuthenticatedAccount> {
        let name = reg.name.trim().to_string();
        let name_chars = name.chars().count();
        if name_chars < MIN_NAME_LEN || name_chars > MAX_NAME_LEN {
            return Err(DomainError::Validation(
                "Name must be between 2 and 50 characters".into(),
            ));
        }
        let email = reg.email.trim().to_lowercase();
        if !looks_like_email(&email) {
            return Err(DomainError::Validation("Please provide a valid email".into()));
        }
        if reg.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        if let Some(phone) = reg.phone.as_deref() {
            if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainError::Validation(
                    "Please provide a valid 10-digit phone number".into(),
                ));
            }
        }

        let role = match reg.role {
            Role::Therapist => {
                let specialization = reg
                    .specialization
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty());
                let license_number = reg
                    .license_number
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty());
                let (Some(specialization), Some(license_number), Some(experience)) =
                    (specialization, license_number, reg.experience)
                else {
                    return Err(DomainError::Validation(
                        "Specialization, license number, and experience are required for therapists"
                            .into(),
                    ));
                };
                if experience > MAX_EXPERIENCE_YEARS {
                    return Err(DomainError::Validation(
                        "Experience must be a number between 0 and 50 years".into(),
                    ));
                }
                RoleProfile::Therapist(TherapistCredentials {
                    specialization: specialization.to_string(),
                    license_number: license_number.to_string(),
                    experience,
                })
            }
            Role::Admin => RoleProfile::Admin,
            Role::User => RoleProfile::User,
        };

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(
                "User already exists with this email".into(),
            ));
        }

        let hash = self.hasher.hash(&reg.password)?;
        let mut account = Account::new(name, email, hash, role);
        account.phone = reg.phone;
        account.date_of_birth = reg.date_of_birth;
        self.accounts.insert(account.clone()).await?;

        // A therapist registration opens a pending registry application.
        // Registration itself still succeeds if that insert is refused
        // (e.g. the license number is already taken); admins can sort the
        // profile out later.
        if let RoleProfile::Therapist(creds) = &account.role {
            let profile = TherapistProfile::new(
                account.id,
                vec![creds.specialization.clone()],
                creds.license_number.clone(),
                creds.experience,
                ProfileContact {
                    email: account.email.clone(),
                    phone: account.phone.clone().unwrap_or_else(|| "000-000-0000".into()),
                    address: None,
                },
            );
            if let Err(err) = self.therapists.insert(profile).await {
                warn!(account = %account.id, %err, "therapist profile not created at registration");
            }
        }

        info!(account = %account.id, role = account.role().as_str(), "account registered");
        let token = self.tokens.issue(&account)?;
        Ok(AuthenticatedAccount { account, token })
    }

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthenticatedAccount> {
        let invalid = || DomainError::Unauthorized("Invalid credentials".into());

        let account = self
            .accounts
            .find_by_email(email.trim())
            .await?
            .ok_or_else(invalid)?;
        if !self.hasher.verify(password, &account.password_hash)? {
            return Err(invalid());
        }
        if !account.is_active {
            return Err(DomainError::Unauthorized(
                "Account is deactivated. Please contact support.".into(),
            ));
        }

        let token = self.tokens.issue(&account)?;
        Ok(AuthenticatedAccount { account, token })
    }

    pub async fn me(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .get(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Creates the configured admin account at startup when it does not
    /// exist yet.
    pub async fn ensure_bootstrap_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<()> {
        if self.accounts.find_by_email(email).await?.is_some() {
            return Ok(());
        }
        let hash = self.hasher.hash(password)?;
        let admin = Account::new(name.into(), email.into(), hash, RoleProfile::Admin);
        self.accounts.insert(admin).await?;
        info!(%email, "bootstrap admin account created");
        Ok(())
    }
}

/// Deliberately loose shape check; real validation is the confirmation
/// email the platform sends outside this crate.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
