//! Error types for the reservation engine.
//!
//! Business-rule rejections are ordinary values of [`ReservationError`],
//! checked by the caller; they are never modelled as panics. Each variant
//! carries the identifiers it concerns and maps to a stable wire code.

use chrono::NaiveDate;
use thiserror::Error;

use super::{EntitlementId, MemberId, ReservationId, SessionId, TenantId};

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min}, got {actual}")]
    BelowMinimum { field: String, min: u32, actual: u32 },

    #[error("End time must be after start time")]
    InvalidTimeRange,
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a below-minimum validation error.
    pub fn below_minimum(field: impl Into<String>, min: u32, actual: u32) -> Self {
        ValidationError::BelowMinimum {
            field: field.into(),
            min,
            actual,
        }
    }
}

/// The kind of shared resource a caller failed to lock in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockedResource {
    Session,
    Entitlement,
}

impl std::fmt::Display for LockedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockedResource::Session => write!(f, "session"),
            LockedResource::Entitlement => write!(f, "entitlement"),
        }
    }
}

/// Errors returned by reservation engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// Session does not exist (or was deleted).
    #[error("Session {0} does not exist")]
    SessionNotFound(SessionId),

    /// Member does not exist.
    #[error("Member {0} does not exist")]
    MemberNotFound(MemberId),

    /// Member holds no entitlement for the session's tenant.
    #[error("No entitlement for member {member} in tenant {tenant}")]
    EntitlementNotFound { member: MemberId, tenant: TenantId },

    /// Reservation record does not exist.
    #[error("Reservation {0} does not exist")]
    ReservationNotFound(ReservationId),

    /// Cross-tenant access or a non-leader attempting a leader action.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The (session, member) pair already has a reservation.
    #[error("Member {member} already holds a reservation for session {session}")]
    AlreadyEnrolled { session: SessionId, member: MemberId },

    /// The session's seat counter reached its capacity ceiling.
    #[error("Session {session} is full ({capacity} seats)")]
    CapacityExceeded { session: SessionId, capacity: u32 },

    /// The entitlement has no remaining uses.
    #[error("Entitlement {0} has no remaining uses")]
    EntitlementExhausted(EntitlementId),

    /// The entitlement's expiry date has passed.
    #[error("Entitlement {entitlement} expired on {expired_on}")]
    EntitlementExpired {
        entitlement: EntitlementId,
        expired_on: NaiveDate,
    },

    /// A resource lock could not be acquired within the configured wait bound.
    #[error("Timed out waiting for the {0} lock")]
    ContentionTimeout(LockedResource),

    /// Persistence failure outside the business-rule taxonomy.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl ReservationError {
    /// Creates a storage error from any displayable cause.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        ReservationError::Storage(cause.to_string())
    }

    /// Returns the stable wire code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ReservationError::SessionNotFound(_) => "SCH_001",
            ReservationError::CapacityExceeded { .. } => "SCH_003",
            ReservationError::AlreadyEnrolled { .. } => "SCH_004",
            ReservationError::AccessDenied(_) => "AUTH_003",
            ReservationError::MemberNotFound(_) => "AUTH_001",
            ReservationError::ReservationNotFound(_) => "ENR_001",
            ReservationError::EntitlementNotFound { .. } => "MEM_001",
            ReservationError::EntitlementExhausted(_) => "MEM_002",
            ReservationError::EntitlementExpired { .. } => "MEM_003",
            ReservationError::ContentionTimeout(_) => "LCK_001",
            ReservationError::Storage(_) => "G001",
        }
    }

    /// True if the caller may retry without re-validating business state.
    ///
    /// Only lock contention qualifies: capacity and balance may have moved by
    /// the time of retry, so every other rejection needs fresh validation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReservationError::ContentionTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn validation_error_below_minimum_displays_correctly() {
        let err = ValidationError::below_minimum("capacity", 1, 0);
        assert_eq!(
            format!("{}", err),
            "Field 'capacity' must be at least 1, got 0"
        );
    }

    #[test]
    fn capacity_exceeded_has_schedule_code() {
        let err = ReservationError::CapacityExceeded {
            session: SessionId::new(),
            capacity: 10,
        };
        assert_eq!(err.code(), "SCH_003");
    }

    #[test]
    fn expired_and_exhausted_have_distinct_codes() {
        let exhausted = ReservationError::EntitlementExhausted(EntitlementId::new());
        let expired = ReservationError::EntitlementExpired {
            entitlement: EntitlementId::new(),
            expired_on: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        assert_ne!(exhausted.code(), expired.code());
    }

    #[test]
    fn only_contention_timeout_is_retryable() {
        assert!(ReservationError::ContentionTimeout(LockedResource::Session).is_retryable());
        assert!(!ReservationError::Storage("down".into()).is_retryable());
        assert!(!ReservationError::CapacityExceeded {
            session: SessionId::new(),
            capacity: 1,
        }
        .is_retryable());
        assert!(!ReservationError::SessionNotFound(SessionId::new()).is_retryable());
    }

    #[test]
    fn display_includes_ids() {
        let session = SessionId::new();
        let member = MemberId::new();
        let err = ReservationError::AlreadyEnrolled { session, member };
        let msg = format!("{}", err);
        assert!(msg.contains(&session.to_string()));
        assert!(msg.contains(&member.to_string()));
    }

    #[test]
    fn locked_resource_displays_lowercase() {
        assert_eq!(format!("{}", LockedResource::Session), "session");
        assert_eq!(format!("{}", LockedResource::Entitlement), "entitlement");
    }
}
