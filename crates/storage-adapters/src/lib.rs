//! Storage adapters for the Therapease ports.
//!
//! The in-memory adapter keeps whole aggregate documents (a post carries
//! its replies and flags, a therapist profile its contact requests) under
//! one `DashMap` entry, so the race-sensitive port operations run under a
//! single per-document lock.

pub mod memory;

pub use memory::{
    MemoryAccountRepo, MemoryJournalRepo, MemoryPostRepo, MemoryTherapistRepo,
};
