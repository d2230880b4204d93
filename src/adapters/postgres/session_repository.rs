//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::get;
use crate::domain::foundation::{MemberId, ReservationError, SessionId, TenantId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), ReservationError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, tenant_id, leader_id, title, capacity, occupied,
                start_time, end_time, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.tenant_id().as_uuid())
        .bind(session.leader_id().as_uuid())
        .bind(session.title())
        .bind(session.capacity() as i32)
        .bind(session.occupied() as i32)
        .bind(session.start_time())
        .bind(session.end_time())
        .bind(session.created_at())
        .bind(session.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to insert session: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, ReservationError> {
        let row = sqlx::query(
            r#"
            SELECT id, tenant_id, leader_id, title, capacity, occupied,
                   start_time, end_time, created_at, updated_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to fetch session: {}", e)))?;

        row.map(row_to_session).transpose()
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, ReservationError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let tenant_id: uuid::Uuid = get(&row, "tenant_id")?;
    let leader_id: uuid::Uuid = get(&row, "leader_id")?;
    let title: String = get(&row, "title")?;
    let capacity: i32 = get(&row, "capacity")?;
    let occupied: i32 = get(&row, "occupied")?;
    let start_time: chrono::DateTime<chrono::Utc> = get(&row, "start_time")?;
    let end_time: chrono::DateTime<chrono::Utc> = get(&row, "end_time")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get(&row, "updated_at")?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        TenantId::from_uuid(tenant_id),
        MemberId::from_uuid(leader_id),
        title,
        capacity as u32,
        occupied as u32,
        start_time,
        end_time,
        created_at,
        updated_at,
    ))
}

