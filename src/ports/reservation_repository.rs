//! Reservation repository port (read side + attendance updates).
//!
//! Reservation records are created only through the atomic
//! [`ReservationWriter`](crate::ports::ReservationWriter). This port covers
//! everything after commit: duplicate checks, lookups, attendance overwrites,
//! and the participant listing.

use crate::domain::foundation::{MemberId, ReservationError, ReservationId, SessionId};
use crate::domain::reservation::{AttendanceMark, Reservation};
use async_trait::async_trait;

/// One row of a session's participant listing.
///
/// The member join is explicit here so implementations fetch names and
/// contacts in a single query instead of one lookup per reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub reservation_id: ReservationId,
    pub member_name: String,
    pub member_contact: String,
    pub attendance_mark: AttendanceMark,
}

/// Repository port for Reservation records.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// True if a reservation already exists for the (session, member) pair.
    async fn exists_for(
        &self,
        session_id: &SessionId,
        member_id: &MemberId,
    ) -> Result<bool, ReservationError>;

    /// Find a reservation by its ID.
    async fn find_by_id(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationError>;

    /// Overwrite the attendance mark of an existing reservation.
    ///
    /// Row-level update atomicity is all this needs; the shared counters are
    /// not involved.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation does not exist
    /// - `Storage` on persistence failure
    async fn update_attendance(
        &self,
        id: &ReservationId,
        mark: AttendanceMark,
    ) -> Result<(), ReservationError>;

    /// List a session's participants, ordered by reservation time.
    async fn list_participants(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ParticipantRecord>, ReservationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReservationRepository) {}
    }
}
