//! Domain layer

pub mod assistant;
pub mod call;
pub mod contact;
pub mod localmail;
pub mod message;
pub mod note;
pub mod session;
pub mod shared;
pub mod user;
pub mod voice_room;
