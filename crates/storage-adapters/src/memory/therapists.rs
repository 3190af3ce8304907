use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    ContactRequest, DomainError, DomainResult, Page, PageRequest, TherapistFilter,
    TherapistProfile, TherapistRepo, TherapistStats, VerificationStatus,
};

use super::paginate;

/// Therapist registry with unique-user and unique-license indexes.
/// Contact requests and verification decisions mutate the profile document
/// under its entry lock.
#[derive(Default)]
pub struct MemoryTherapistRepo {
    docs: DashMap<Uuid, TherapistProfile>,
    user_index: DashMap<Uuid, Uuid>,
    license_index: DashMap<String, Uuid>,
}

impl MemoryTherapistRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TherapistRepo for MemoryTherapistRepo {
    async fn insert(&self, profile: TherapistProfile) -> DomainResult<()> {
        match self.user_index.entry(profile.user_id) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(
                    "You already have a therapist application".into(),
                ))
            }
            Entry::Vacant(slot) => slot.insert(profile.id),
        };
        match self.license_index.entry(profile.license_number.clone()) {
            Entry::Occupied(_) => {
                // Release the user claim made above
                self.user_index.remove(&profile.user_id);
                return Err(DomainError::Conflict(
                    "License number already exists. Please use a unique license number.".into(),
                ));
            }
            Entry::Vacant(slot) => slot.insert(profile.id),
        };
        self.docs.insert(profile.id, profile);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<TherapistProfile>> {
        Ok(self.docs.get(&id).map(|doc| doc.clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<TherapistProfile>> {
        let id = match self.user_index.get(&user_id) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.get(id).await
    }

    async fn record_decision(
        &self,
        id: Uuid,
        admin_id: Uuid,
        approved: bool,
        rejection_reason: Option<String>,
    ) -> DomainResult<TherapistProfile> {
        let mut doc = self
            .docs
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("Therapist application not found".into()))?;
        doc.decide(admin_id, approved, rejection_reason)?;
        Ok(doc.clone())
    }

    async fn add_contact_request(&self, id: Uuid, request: ContactRequest) -> DomainResult<()> {
        let mut doc = self
            .docs
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Therapist"))?;
        doc.add_contact_request(request)
    }

    async fn list_verified(
        &self,
        filter: TherapistFilter,
        page: PageRequest,
    ) -> DomainResult<Page<TherapistProfile>> {
        let mut matches: Vec<TherapistProfile> = self
            .docs
            .iter()
            .filter(|doc| {
                doc.is_listable()
                    && filter
                        .specialization
                        .as_deref()
                        .is_none_or(|wanted| doc.matches_specialization(wanted))
            })
            .map(|doc| doc.clone())
            .collect();
        matches.sort_by(|a, b| {
            b.rating
                .average
                .partial_cmp(&a.rating.average)
                .unwrap_or(Ordering::Equal)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(paginate(matches, page))
    }

    async fn list_pending(&self) -> DomainResult<Vec<TherapistProfile>> {
        let mut pending: Vec<TherapistProfile> = self
            .docs
            .iter()
            .filter(|doc| doc.verification_status == VerificationStatus::Pending)
            .map(|doc| doc.clone())
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(pending)
    }

    async fn stats(&self, since: DateTime<Utc>) -> DomainResult<TherapistStats> {
        let mut stats = TherapistStats::default();
        for doc in self.docs.iter() {
            stats.total += 1;
            if doc.verified {
                stats.verified += 1;
            }
            if doc.verification_status == VerificationStatus::Pending {
                stats.pending += 1;
            }
            if doc.created_at >= since {
                stats.new_in_window += 1;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{ContactDetails, ProfileContact};

    fn profile(user: Uuid, license: &str) -> TherapistProfile {
        TherapistProfile::new(
            user,
            vec!["Anxiety".into()],
            license.into(),
            5,
            ProfileContact {
                email: "t@example.com".into(),
                phone: "5550100000".into(),
                address: None,
            },
        )
    }

    #[tokio::test]
    async fn one_profile_per_user() {
        let repo = MemoryTherapistRepo::new();
        let user = Uuid::now_v7();
        repo.insert(profile(user, "LIC-1")).await.unwrap();

        let err = repo.insert(profile(user, "LIC-2")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn license_numbers_are_unique() {
        let repo = MemoryTherapistRepo::new();
        repo.insert(profile(Uuid::now_v7(), "LIC-1")).await.unwrap();

        let second_user = Uuid::now_v7();
        let err = repo.insert(profile(second_user, "LIC-1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // The failed insert must not leave a stale user claim behind
        repo.insert(profile(second_user, "LIC-2")).await.unwrap();
    }

    #[tokio::test]
    async fn decision_is_atomic_and_terminal() {
        let repo = MemoryTherapistRepo::new();
        let p = profile(Uuid::now_v7(), "LIC-1");
        let id = p.id;
        repo.insert(p).await.unwrap();

        let admin = Uuid::now_v7();
        let decided = repo.record_decision(id, admin, true, None).await.unwrap();
        assert!(decided.verified);

        let err = repo
            .record_decision(id, admin, false, Some("late".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn verified_listing_filters_by_specialization() {
        let repo = MemoryTherapistRepo::new();
        let mut verified = profile(Uuid::now_v7(), "LIC-1");
        verified.decide(Uuid::now_v7(), true, None).unwrap();
        repo.insert(verified).await.unwrap();
        repo.insert(profile(Uuid::now_v7(), "LIC-2")).await.unwrap(); // still pending

        let page = repo
            .list_verified(TherapistFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);

        let none = repo
            .list_verified(
                TherapistFilter { specialization: Some("couples".into()) },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(none.total_items, 0);
    }

    #[tokio::test]
    async fn pending_listing_is_fifo() {
        let repo = MemoryTherapistRepo::new();
        let first = profile(Uuid::now_v7(), "LIC-1");
        let second = profile(Uuid::now_v7(), "LIC-2");
        let first_id = first.id;
        repo.insert(first).await.unwrap();
        repo.insert(second).await.unwrap();

        let pending = repo.list_pending().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, first_id);
    }

    #[tokio::test]
    async fn contact_request_goes_through_the_document_lock() {
        let repo = MemoryTherapistRepo::new();
        let mut p = profile(Uuid::now_v7(), "LIC-1");
        p.decide(Uuid::now_v7(), true, None).unwrap();
        let id = p.id;
        repo.insert(p).await.unwrap();

        let user = Uuid::now_v7();
        repo.add_contact_request(id, ContactRequest::new(user, "Hello".into(), ContactDetails::default()))
            .await
            .unwrap();
        let err = repo
            .add_contact_request(id, ContactRequest::new(user, "Again".into(), ContactDetails::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
