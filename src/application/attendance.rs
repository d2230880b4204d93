//! Leader-facing roster operations: marking attendance and listing
//! participants.
//!
//! Both are guarded the same way: only the member who leads the session may
//! touch its roster. Neither operation involves the shared counters, so no
//! locks are taken here.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, ReservationError, ReservationId, SessionId};
use crate::domain::reservation::AttendanceMark;
use crate::ports::{ParticipantRecord, ReservationRepository, SessionRepository};

/// Overwrites the attendance mark on a reservation.
pub struct MarkAttendanceHandler {
    sessions: Arc<dyn SessionRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl MarkAttendanceHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            sessions,
            reservations,
        }
    }

    /// Set `mark` on `reservation_id`, on behalf of `caller`.
    ///
    /// The mark is a plain overwrite: a leader may correct a mistaken mark by
    /// marking again, including back to `Pending`.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation does not exist
    /// - `SessionNotFound` if its session has disappeared
    /// - `AccessDenied` if `caller` does not lead the session
    pub async fn mark(
        &self,
        caller: MemberId,
        reservation_id: ReservationId,
        mark: AttendanceMark,
    ) -> Result<(), ReservationError> {
        let reservation = self
            .reservations
            .find_by_id(&reservation_id)
            .await?
            .ok_or(ReservationError::ReservationNotFound(reservation_id))?;

        let session = self
            .sessions
            .find_by_id(reservation.session_id())
            .await?
            .ok_or(ReservationError::SessionNotFound(*reservation.session_id()))?;

        if !session.is_led_by(&caller) {
            return Err(ReservationError::AccessDenied(
                "only the session leader may mark attendance".to_string(),
            ));
        }

        self.reservations.update_attendance(&reservation_id, mark).await
    }
}

/// Lists a session's participants for its leader.
pub struct ListParticipantsHandler {
    sessions: Arc<dyn SessionRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl ListParticipantsHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            sessions,
            reservations,
        }
    }

    /// List the participants of `session_id`, ordered by reservation time.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist
    /// - `AccessDenied` if `caller` does not lead the session
    pub async fn list(
        &self,
        caller: MemberId,
        session_id: SessionId,
    ) -> Result<Vec<ParticipantRecord>, ReservationError> {
        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(ReservationError::SessionNotFound(session_id))?;

        if !session.is_led_by(&caller) {
            return Err(ReservationError::AccessDenied(
                "only the session leader may list participants".to_string(),
            ));
        }

        self.reservations.list_participants(&session_id).await
    }
}
