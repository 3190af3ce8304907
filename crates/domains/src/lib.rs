//! The central domain logic and interface definitions for Therapease.
//!
//! Models carry their own invariants as pure mutators (`Post::add_flag`,
//! `TherapistProfile::decide`, ...) so the rules are testable without a
//! running store. Persistence is reached only through the port traits in
//! [`ports`].

pub mod account;
pub mod board;
pub mod error;
pub mod journal;
pub mod page;
pub mod ports;
pub mod therapist;

// Re-exporting for easier access in other crates
pub use account::*;
pub use board::*;
pub use error::*;
pub use journal::*;
pub use page::*;
pub use ports::*;
pub use therapist::*;
