//! Shared domain primitives: identifiers and the error taxonomy.

mod errors;
mod ids;

pub use errors::{LockedResource, ReservationError, ValidationError};
pub use ids::{EntitlementId, MemberId, ReservationId, SessionId, TenantId};
