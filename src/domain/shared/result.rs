//! Domain result type

use super::error::DomainError;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;
