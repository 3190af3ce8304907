//! HTTP adapter: axum handlers, extractors, the JSON envelope, and the
//! route table.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod views;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
