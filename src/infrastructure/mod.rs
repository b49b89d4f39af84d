//! Infrastructure implementations

pub mod assistant;
pub mod persistence;
