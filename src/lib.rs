//! Lynix - a multi-tenant web portal backend
//!
//! Lynix bundles a user directory, direct messaging, call signaling,
//! a voice-room relay, notes, contacts, local mail and an AI-chat proxy
//! behind stateless JSON handlers over a shared PostgreSQL pool.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
