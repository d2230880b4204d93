//! Session repository port.
//!
//! Sessions are created and deleted by external scheduling flows; the engine
//! reads them and rewrites the seat counter through the atomic reservation
//! writer, never through this port.

use crate::domain::foundation::{ReservationError, SessionId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Repository port for Session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// - `Storage` on persistence failure
    async fn insert(&self, session: &Session) -> Result<(), ReservationError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if the session does not exist or was deleted.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, ReservationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SessionRepository) {}
    }
}
