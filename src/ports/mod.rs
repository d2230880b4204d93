//! Ports: the seams between the engine and the outside world.
//!
//! Repository traits for persistence, one atomic writer for the reservation
//! unit, and a best-effort notifier per delivery channel.

mod entitlement_repository;
mod member_repository;
mod notifier;
mod reservation_repository;
mod reservation_writer;
mod session_repository;

pub use entitlement_repository::EntitlementRepository;
pub use member_repository::MemberRepository;
pub use notifier::{Notifier, NotifyError};
pub use reservation_repository::{ParticipantRecord, ReservationRepository};
pub use reservation_writer::ReservationWriter;
pub use session_repository::SessionRepository;
