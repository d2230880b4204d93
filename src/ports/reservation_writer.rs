//! Atomic reservation writer port.
//!
//! The single seam through which the reservation unit reaches storage: the
//! session's new occupancy, the entitlement's new balance, and the fresh
//! reservation record land together or not at all. The coordinator validates
//! and mutates local copies first, so a rejected unit never touches this
//! port and there is nothing to roll back on the validation path.

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::ReservationError;
use crate::domain::reservation::Reservation;
use crate::domain::session::Session;
use async_trait::async_trait;

/// Port that persists one complete reservation unit atomically.
///
/// Implementations must ensure:
/// - all three writes commit as one unit (a failure leaves no partial state)
/// - no reader observes the seat increment without the balance decrement
/// - the (session, member) uniqueness constraint is re-enforced at commit
///   time, so a duplicate that slipped past the coordinator's pre-lock check
///   still fails with `AlreadyEnrolled`
#[async_trait]
pub trait ReservationWriter: Send + Sync {
    /// Commit the reservation unit.
    ///
    /// # Errors
    ///
    /// - `AlreadyEnrolled` if the (session, member) pair gained a reservation
    ///   since validation
    /// - `Storage` on persistence failure (nothing is committed)
    async fn commit(
        &self,
        session: &Session,
        entitlement: &Entitlement,
        reservation: &Reservation,
    ) -> Result<(), ReservationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_writer_is_object_safe() {
        fn _accepts_dyn(_writer: &dyn ReservationWriter) {}
    }
}
