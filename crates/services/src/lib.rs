//! Use-case services for Therapease.
//!
//! Each service validates at its own boundary, applies the role/ownership
//! gates the operation demands, and reaches persistence only through the
//! `domains` ports. Role checks that belong to the HTTP surface (admin-only
//! routes) live in the API layer's extractors, not here.

pub mod analytics;
pub mod board;
pub mod dashboard;
pub mod directory;
pub mod journal;
pub mod moderation;
pub mod therapist;

pub use analytics::{AnalyticsService, PlatformAnalytics};
pub use board::BoardService;
pub use dashboard::{
    AdminDashboard, DashboardService, TherapistDashboard, UserDashboard,
};
pub use directory::{AuthenticatedAccount, DirectoryService, Registration};
pub use journal::{JournalService, JournalUpdate, NewJournalEntry};
pub use moderation::ModerationService;
pub use therapist::{ApplicationContact, TherapistApplication, TherapistService};
