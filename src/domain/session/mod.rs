//! Session aggregate - the capacity guard.
//!
//! A session is a time-boxed slot with a finite number of seats. The
//! `occupied` counter is the only mutable piece of shared state here, and it
//! is mutated exclusively by the reservation coordinator while it holds the
//! session's exclusive lock.
//!
//! # Ownership
//!
//! Sessions reference their leader and tenant by ID but own neither.
//! Reservations referencing a session are owned by the coordinator's
//! transaction boundary, not by the session.

use crate::domain::foundation::{
    MemberId, ReservationError, SessionId, TenantId, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session aggregate - a bookable time slot with a capacity ceiling.
///
/// # Invariants
///
/// - `capacity >= 1`
/// - `0 <= occupied <= capacity`, observable by any reader at any time
/// - `start_time < end_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Tenant the session belongs to.
    tenant_id: TenantId,

    /// Member who leads the session.
    leader_id: MemberId,

    /// Session title, shown in notifications.
    title: String,

    /// Maximum simultaneous reservation count.
    capacity: u32,

    /// Current reservation count.
    occupied: u32,

    /// When the session starts.
    start_time: DateTime<Utc>,

    /// When the session ends.
    end_time: DateTime<Utc>,

    /// When the session was created.
    created_at: DateTime<Utc>,

    /// When the session was last updated.
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with zero occupancy.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `BelowMinimum` if capacity is zero
    /// - `InvalidTimeRange` if the end does not come after the start
    pub fn new(
        id: SessionId,
        tenant_id: TenantId,
        leader_id: MemberId,
        title: String,
        capacity: u32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if capacity == 0 {
            return Err(ValidationError::below_minimum("capacity", 1, 0));
        }
        if end_time <= start_time {
            return Err(ValidationError::InvalidTimeRange);
        }

        let now = Utc::now();
        Ok(Self {
            id,
            tenant_id,
            leader_id,
            title,
            capacity,
            occupied: 0,
            start_time,
            end_time,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        tenant_id: TenantId,
        leader_id: MemberId,
        title: String,
        capacity: u32,
        occupied: u32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            leader_id,
            title,
            capacity,
            occupied,
            start_time,
            end_time,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn leader_id(&self) -> &MemberId {
        &self.leader_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn occupied(&self) -> u32 {
        self.occupied
    }

    /// Seats still available.
    pub fn remaining_seats(&self) -> u32 {
        self.capacity - self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.capacity
    }

    pub fn start_time(&self) -> &DateTime<Utc> {
        &self.start_time
    }

    pub fn end_time(&self) -> &DateTime<Utc> {
        &self.end_time
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given member leads this session.
    pub fn is_led_by(&self, member_id: &MemberId) -> bool {
        &self.leader_id == member_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Take one seat, returning the new occupancy.
    ///
    /// The check-then-increment is safe only while the caller holds the
    /// exclusive lock on this session's counter; the coordinator guarantees
    /// that.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` if the session is already full; no mutation occurs
    pub fn try_occupy(&mut self) -> Result<u32, ReservationError> {
        if self.occupied >= self.capacity {
            return Err(ReservationError::CapacityExceeded {
                session: self.id,
                capacity: self.capacity,
            });
        }

        self.occupied += 1;
        self.updated_at = Utc::now();
        Ok(self.occupied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn test_session(capacity: u32) -> Session {
        let start = Utc::now() + Duration::hours(1);
        Session::new(
            SessionId::new(),
            TenantId::new(),
            MemberId::new(),
            "Morning Flow".to_string(),
            capacity,
            start,
            start + Duration::hours(1),
        )
        .unwrap()
    }

    // Construction tests

    #[test]
    fn new_session_starts_empty() {
        let session = test_session(5);
        assert_eq!(session.occupied(), 0);
        assert_eq!(session.remaining_seats(), 5);
        assert!(!session.is_full());
    }

    #[test]
    fn new_session_rejects_blank_title() {
        let start = Utc::now();
        let result = Session::new(
            SessionId::new(),
            TenantId::new(),
            MemberId::new(),
            "   ".to_string(),
            5,
            start,
            start + Duration::hours(1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_session_rejects_zero_capacity() {
        let start = Utc::now();
        let result = Session::new(
            SessionId::new(),
            TenantId::new(),
            MemberId::new(),
            "Evening Flow".to_string(),
            0,
            start,
            start + Duration::hours(1),
        );
        assert!(matches!(result, Err(ValidationError::BelowMinimum { .. })));
    }

    #[test]
    fn new_session_rejects_inverted_time_range() {
        let start = Utc::now();
        let result = Session::new(
            SessionId::new(),
            TenantId::new(),
            MemberId::new(),
            "Evening Flow".to_string(),
            5,
            start,
            start - Duration::hours(1),
        );
        assert!(matches!(result, Err(ValidationError::InvalidTimeRange)));
    }

    // Occupancy tests

    #[test]
    fn try_occupy_increments_by_one() {
        let mut session = test_session(2);
        assert_eq!(session.try_occupy().unwrap(), 1);
        assert_eq!(session.try_occupy().unwrap(), 2);
        assert!(session.is_full());
    }

    #[test]
    fn try_occupy_fails_when_full() {
        let mut session = test_session(1);
        session.try_occupy().unwrap();

        let result = session.try_occupy();
        assert!(matches!(
            result,
            Err(ReservationError::CapacityExceeded { capacity: 1, .. })
        ));
        // No mutation on failure.
        assert_eq!(session.occupied(), 1);
    }

    #[test]
    fn leader_check_matches_leader_only() {
        let session = test_session(3);
        assert!(session.is_led_by(session.leader_id()));
        assert!(!session.is_led_by(&MemberId::new()));
    }

    proptest! {
        // occupied never exceeds capacity no matter how many attempts are made
        #[test]
        fn occupancy_never_exceeds_capacity(capacity in 1u32..50, attempts in 0usize..200) {
            let mut session = test_session(capacity);
            let mut successes = 0u32;
            for _ in 0..attempts {
                if session.try_occupy().is_ok() {
                    successes += 1;
                }
                prop_assert!(session.occupied() <= session.capacity());
            }
            prop_assert_eq!(successes, (attempts as u32).min(capacity));
        }
    }
}
