pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod journals;
pub mod posts;
pub mod therapists;
