//! Application services: the use cases composed from domain aggregates and
//! ports.
//!
//! `ReservationCoordinator` is the only writer of the shared counters and the
//! only place locks are taken. The attendance handlers are plain guarded
//! reads and row updates. The dispatcher carries everything that must not be
//! allowed to slow a reservation down.

pub mod attendance;
pub mod dispatcher;
pub mod locks;
pub mod reserve;

pub use attendance::{ListParticipantsHandler, MarkAttendanceHandler};
pub use dispatcher::{MessageTemplate, NotificationDispatcher, OutboundNotification};
pub use locks::{ResourceGuard, ResourceLocks};
pub use reserve::ReservationCoordinator;
