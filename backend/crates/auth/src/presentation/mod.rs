//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the request gate.

pub mod api_v1;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use middleware::{CurrentUser, GateOutcome, authenticate};
pub use router::{api_v1_router, auth_router, user_service_router};
pub use state::AppState;
