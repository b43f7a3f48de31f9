//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the clock.

pub mod clock;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{
    session::{SessionExpiration, SessionRecord},
    user::User,
};
pub use repository::{AuthStore, SessionRepository, UserFilter, UserRepository, UserUpdate};
