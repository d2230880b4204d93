//! Studiobook - Reservation Engine
//!
//! This crate implements the reservation core for capacity-bound sessions:
//! members spend entitlement passes to take seats, and the engine keeps the
//! seat counter, the pass balance, and the reservation record consistent
//! under concurrent load.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
