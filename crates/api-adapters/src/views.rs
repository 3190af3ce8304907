//! Wire representations that differ from the stored documents: author
//! masking on the board and the public-safe therapist profile.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use domains::{
    Account, AccountRepo, Certification, DomainResult, Education, FlagReason, Post,
    PracticeInfo, Rating, Reply, TherapistProfile,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl AuthorView {
    /// Anonymous content never reveals the author, not even the id; the
    /// real id stays in the document for authorization checks.
    fn resolve(author_id: Uuid, anonymous: bool, names: &HashMap<Uuid, Account>) -> Self {
        if anonymous {
            return Self {
                id: Uuid::nil(),
                name: "Anonymous".into(),
                role: "user".into(),
            };
        }
        match names.get(&author_id) {
            Some(account) => Self {
                id: account.id,
                name: account.name.clone(),
                role: account.role().as_str().into(),
            },
            None => Self {
                id: author_id,
                name: "Unknown".into(),
                role: "user".into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyView {
    pub id: Uuid,
    pub author: AuthorView,
    pub content: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagView {
    pub user_id: Uuid,
    pub reason: FlagReason,
    pub flagged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalView {
    pub removed_by: Uuid,
    pub removed_at: DateTime<Utc>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub author: AuthorView,
    pub content: String,
    pub is_anonymous: bool,
    pub replies: Vec<ReplyView>,
    pub reply_count: u64,
    pub flag_count: u64,
    pub is_active: bool,
    /// Flag details, admin listings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<FlagView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<RemovalView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    pub fn render(post: Post, names: &HashMap<Uuid, Account>) -> Self {
        Self::build(post, names, false)
    }

    /// Admin rendering keeps flag details and removal metadata.
    pub fn render_for_admin(post: Post, names: &HashMap<Uuid, Account>) -> Self {
        Self::build(post, names, true)
    }

    fn build(post: Post, names: &HashMap<Uuid, Account>, admin: bool) -> Self {
        let replies = post
            .replies
            .iter()
            .map(|reply: &Reply| ReplyView {
                id: reply.id,
                author: AuthorView::resolve(reply.author_id, reply.anonymous, names),
                content: reply.content.clone(),
                is_anonymous: reply.anonymous,
                created_at: reply.created_at,
            })
            .collect();
        let flags = admin.then(|| {
            post.flags
                .iter()
                .map(|flag| FlagView {
                    user_id: flag.user_id,
                    reason: flag.reason,
                    flagged_at: flag.flagged_at,
                })
                .collect()
        });
        let removal = if admin {
            post.removal.as_ref().map(|r| RemovalView {
                removed_by: r.removed_by,
                removed_at: r.removed_at,
                reason: r.reason.clone(),
            })
        } else {
            None
        };

        Self {
            id: post.id,
            author: AuthorView::resolve(post.author_id, post.anonymous, names),
            content: post.content,
            is_anonymous: post.anonymous,
            replies,
            reply_count: post.reply_count,
            flag_count: post.flag_count,
            is_active: post.is_active,
            flags,
            removal,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Loads every account a batch of posts refers to, replies included.
pub async fn author_directory(
    accounts: &dyn AccountRepo,
    posts: &[Post],
) -> DomainResult<HashMap<Uuid, Account>> {
    let mut ids: Vec<Uuid> = posts
        .iter()
        .flat_map(|post| {
            std::iter::once(post.author_id)
                .chain(post.replies.iter().map(|reply| reply.author_id))
        })
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let mut names = HashMap::with_capacity(ids.len());
    for id in ids {
        if let Some(account) = accounts.get(id).await? {
            names.insert(id, account);
        }
    }
    Ok(names)
}

/// Contact info shown publicly: email, phone, and the state only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicContact {
    pub email: String,
    pub phone: String,
    pub state: Option<String>,
}

/// The directory listing entry. License number, verifier identity,
/// rejection reason, and contact requests never leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTherapistView {
    pub id: Uuid,
    pub name: String,
    pub specialization: Vec<String>,
    pub experience: u32,
    pub education: Option<Education>,
    pub certifications: Vec<Certification>,
    pub practice_info: Option<PracticeInfo>,
    pub bio: Option<String>,
    pub rating: Rating,
    pub verified: bool,
    pub contact_info: PublicContact,
    pub created_at: DateTime<Utc>,
}

impl PublicTherapistView {
    pub fn render(profile: TherapistProfile, names: &HashMap<Uuid, Account>) -> Self {
        let name = names
            .get(&profile.user_id)
            .map(|account| account.name.clone())
            .unwrap_or_else(|| "Unknown".into());
        Self {
            id: profile.id,
            name,
            specialization: profile.specialization,
            experience: profile.experience,
            education: profile.education,
            certifications: profile.certifications,
            practice_info: profile.practice_info,
            bio: profile.bio,
            rating: profile.rating,
            verified: profile.verified,
            contact_info: PublicContact {
                email: profile.contact_info.email,
                phone: profile.contact_info.phone,
                state: profile.contact_info.address.and_then(|a| a.state),
            },
            created_at: profile.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::RoleProfile;

    #[test]
    fn anonymous_posts_hide_the_author() {
        let author = Account::new("A".into(), "a@example.com".into(), "h".into(), RoleProfile::Admin);
        let post = Post::new(author.id, "hello".into(), true);
        let mut names = HashMap::new();
        names.insert(author.id, author.clone());

        let view = PostView::render(post, &names);
        assert_eq!(view.author.name, "Anonymous");
        assert_eq!(view.author.role, "user");
        assert_eq!(view.author.id, Uuid::nil());
    }

    #[test]
    fn named_posts_carry_the_author() {
        let author = Account::new("Ada".into(), "ada@example.com".into(), "h".into(), RoleProfile::User);
        let post = Post::new(author.id, "hello".into(), false);
        let mut names = HashMap::new();
        names.insert(author.id, author.clone());

        let view = PostView::render(post, &names);
        assert_eq!(view.author.name, "Ada");
        assert_eq!(view.author.id, author.id);
        assert!(view.flags.is_none());
    }
}
