//! Adapters: concrete implementations of the ports.
//!
//! - `memory` backs every persistence port with in-process maps
//! - `postgres` backs them with sqlx against PostgreSQL
//! - `notify` implements the delivery channels

pub mod memory;
pub mod notify;
pub mod postgres;
