//! Entitlement repository port.
//!
//! Entitlements are granted and replenished by an external purchase flow;
//! the engine resolves and reads them here, and spends them only through the
//! atomic reservation writer.

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{EntitlementId, MemberId, ReservationError, TenantId};
use async_trait::async_trait;

/// Repository port for Entitlement persistence.
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Persist a new entitlement.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    async fn insert(&self, entitlement: &Entitlement) -> Result<(), ReservationError>;

    /// Find an entitlement by its ID.
    async fn find_by_id(
        &self,
        id: &EntitlementId,
    ) -> Result<Option<Entitlement>, ReservationError>;

    /// Find the entitlement a member would spend in the given tenant.
    ///
    /// When the member holds several, the one with the latest expiry wins.
    /// Usability (expiry, balance) is NOT filtered here — the ledger reports
    /// the precise rejection itself.
    async fn find_for_member(
        &self,
        member_id: &MemberId,
        tenant_id: &TenantId,
    ) -> Result<Option<Entitlement>, ReservationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entitlement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EntitlementRepository) {}
    }
}
