//! Shared handler state: one `Arc` per service plus the ports the
//! extractors need directly.

use std::sync::Arc;

use domains::{AccountRepo, TokenIssuer};
use services::{
    AnalyticsService, BoardService, DashboardService, DirectoryService, JournalService,
    ModerationService, TherapistService,
};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryService>,
    pub board: Arc<BoardService>,
    pub journals: Arc<JournalService>,
    pub therapists: Arc<TherapistService>,
    pub moderation: Arc<ModerationService>,
    pub analytics: Arc<AnalyticsService>,
    pub dashboards: Arc<DashboardService>,
    pub accounts: Arc<dyn AccountRepo>,
    pub tokens: Arc<dyn TokenIssuer>,
}
