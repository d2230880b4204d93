//! PostgreSQL implementation of ReservationWriter.
//!
//! One transaction carries the seat count, the entitlement balance, and the
//! new reservation record. The `uk_reservation_session_member` unique
//! constraint is the last line of defense against duplicate pairs; a
//! violation surfaces as `AlreadyEnrolled`, not as a storage failure.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::ReservationError;
use crate::domain::reservation::Reservation;
use crate::domain::session::Session;
use crate::ports::ReservationWriter;

const PAIR_CONSTRAINT: &str = "uk_reservation_session_member";

/// PostgreSQL implementation of ReservationWriter.
#[derive(Clone)]
pub struct PostgresReservationWriter {
    pool: PgPool,
}

impl PostgresReservationWriter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationWriter for PostgresReservationWriter {
    async fn commit(
        &self,
        session: &Session,
        entitlement: &Entitlement,
        reservation: &Reservation,
    ) -> Result<(), ReservationError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ReservationError::storage(format!("failed to begin transaction: {}", e)))?;

        let result = sqlx::query("UPDATE sessions SET occupied = $2, updated_at = $3 WHERE id = $1")
            .bind(session.id().as_uuid())
            .bind(session.occupied() as i32)
            .bind(session.updated_at())
            .execute(&mut *tx)
            .await
            .map_err(|e| ReservationError::storage(format!("failed to update session: {}", e)))?;
        if result.rows_affected() == 0 {
            return Err(ReservationError::SessionNotFound(*session.id()));
        }

        let result = sqlx::query("UPDATE entitlements SET remaining = $2 WHERE id = $1")
            .bind(entitlement.id().as_uuid())
            .bind(entitlement.remaining() as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                ReservationError::storage(format!("failed to update entitlement: {}", e))
            })?;
        if result.rows_affected() == 0 {
            return Err(ReservationError::EntitlementNotFound {
                member: *entitlement.holder_id(),
                tenant: *entitlement.tenant_id(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO reservations (id, session_id, member_id, created_at, attendance_mark)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reservation.id().as_uuid())
        .bind(reservation.session_id().as_uuid())
        .bind(reservation.member_id().as_uuid())
        .bind(reservation.created_at())
        .bind(reservation.attendance_mark().as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_pair_violation(&e) {
                ReservationError::AlreadyEnrolled {
                    session: *reservation.session_id(),
                    member: *reservation.member_id(),
                }
            } else {
                ReservationError::storage(format!("failed to insert reservation: {}", e))
            }
        })?;

        tx.commit()
            .await
            .map_err(|e| ReservationError::storage(format!("failed to commit transaction: {}", e)))
    }
}

fn is_pair_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.constraint())
        .map_or(false, |name| name == PAIR_CONSTRAINT)
}
