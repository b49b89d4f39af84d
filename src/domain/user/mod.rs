//! User directory domain

pub mod entity;
pub mod repository;

pub use entity::{Billing, CreateUser, Plan, UpdateUser, User, UserRole, UserSummary};
pub use repository::UserRepository;
