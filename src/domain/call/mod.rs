//! Call signaling domain

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::Call;
pub use repository::CallRepository;
pub use value_object::CallStatus;
