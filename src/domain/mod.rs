//! Domain layer: aggregates, entities, and domain errors.
//!
//! Everything in here is pure state and rules. Locking, persistence, and
//! notification side effects live behind the ports and in the application
//! layer.

pub mod entitlement;
pub mod foundation;
pub mod member;
pub mod reservation;
pub mod session;
