//! PostgreSQL adapters - database implementations of the persistence ports.
//!
//! Each repository maps one aggregate; `PostgresReservationWriter` is the
//! transactional commit path for the reservation unit.

mod entitlement_repository;
mod member_repository;
mod reservation_repository;
mod session_repository;
mod writer;

pub use entitlement_repository::PostgresEntitlementRepository;
pub use member_repository::PostgresMemberRepository;
pub use reservation_repository::PostgresReservationRepository;
pub use session_repository::PostgresSessionRepository;
pub use writer::PostgresReservationWriter;

use sqlx::Row;

use crate::domain::foundation::ReservationError;

fn get<'r, T>(row: &'r sqlx::postgres::PgRow, column: &str) -> Result<T, ReservationError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| ReservationError::storage(format!("failed to get {}: {}", column, e)))
}
