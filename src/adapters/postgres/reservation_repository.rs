//! PostgreSQL implementation of ReservationRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::get;
use crate::domain::foundation::{MemberId, ReservationError, ReservationId, SessionId};
use crate::domain::reservation::{AttendanceMark, Reservation};
use crate::ports::{ParticipantRecord, ReservationRepository};

/// PostgreSQL implementation of ReservationRepository.
#[derive(Clone)]
pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn exists_for(
        &self,
        session_id: &SessionId,
        member_id: &MemberId,
    ) -> Result<bool, ReservationError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM reservations WHERE session_id = $1 AND member_id = $2",
        )
        .bind(session_id.as_uuid())
        .bind(member_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            ReservationError::storage(format!("failed to check reservation existence: {}", e))
        })?;

        Ok(result.0 > 0)
    }

    async fn find_by_id(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, member_id, created_at, attendance_mark
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to fetch reservation: {}", e)))?;

        row.map(row_to_reservation).transpose()
    }

    async fn update_attendance(
        &self,
        id: &ReservationId,
        mark: AttendanceMark,
    ) -> Result<(), ReservationError> {
        let result = sqlx::query("UPDATE reservations SET attendance_mark = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(mark.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                ReservationError::storage(format!("failed to update attendance: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(ReservationError::ReservationNotFound(*id));
        }

        Ok(())
    }

    async fn list_participants(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ParticipantRecord>, ReservationError> {
        // One join fetches the roster; no per-reservation member lookups.
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.attendance_mark, m.name, m.contact
            FROM reservations r
            JOIN members m ON m.id = r.member_id
            WHERE r.session_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to list participants: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let id: uuid::Uuid = get(&row, "id")?;
                let mark_str: String = get(&row, "attendance_mark")?;
                let member_name: String = get(&row, "name")?;
                let member_contact: String = get(&row, "contact")?;

                Ok(ParticipantRecord {
                    reservation_id: ReservationId::from_uuid(id),
                    member_name,
                    member_contact,
                    attendance_mark: parse_attendance_mark(&mark_str)?,
                })
            })
            .collect()
    }
}

fn row_to_reservation(row: sqlx::postgres::PgRow) -> Result<Reservation, ReservationError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let session_id: uuid::Uuid = get(&row, "session_id")?;
    let member_id: uuid::Uuid = get(&row, "member_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let mark_str: String = get(&row, "attendance_mark")?;

    Ok(Reservation::reconstitute(
        ReservationId::from_uuid(id),
        SessionId::from_uuid(session_id),
        MemberId::from_uuid(member_id),
        created_at,
        parse_attendance_mark(&mark_str)?,
    ))
}

fn parse_attendance_mark(s: &str) -> Result<AttendanceMark, ReservationError> {
    AttendanceMark::parse(s)
        .ok_or_else(|| ReservationError::storage(format!("invalid attendance mark: {}", s)))
}
