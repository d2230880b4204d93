//! Member repository port.

use crate::domain::foundation::{MemberId, ReservationError};
use crate::domain::member::Member;
use async_trait::async_trait;

/// Repository port for Member persistence.
///
/// Registration is an external flow; the engine resolves members for tenant
/// checks, leader authorization, and notification recipients.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a new member.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    async fn insert(&self, member: &Member) -> Result<(), ReservationError>;

    /// Find a member by their ID.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, ReservationError>;
}
