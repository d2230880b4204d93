//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::get;
use crate::domain::foundation::{MemberId, ReservationError, TenantId};
use crate::domain::member::Member;
use crate::ports::MemberRepository;

/// PostgreSQL implementation of MemberRepository.
#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn insert(&self, member: &Member) -> Result<(), ReservationError> {
        sqlx::query(
            r#"
            INSERT INTO members (id, tenant_id, name, contact, push_token)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id().as_uuid())
        .bind(member.tenant_id().as_uuid())
        .bind(member.name())
        .bind(member.contact())
        .bind(member.push_token())
        .execute(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to insert member: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, ReservationError> {
        let row = sqlx::query(
            r#"
            SELECT id, tenant_id, name, contact, push_token
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to fetch member: {}", e)))?;

        row.map(row_to_member).transpose()
    }
}

fn row_to_member(row: sqlx::postgres::PgRow) -> Result<Member, ReservationError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let tenant_id: uuid::Uuid = get(&row, "tenant_id")?;
    let name: String = get(&row, "name")?;
    let contact: String = get(&row, "contact")?;
    let push_token: Option<String> = get(&row, "push_token")?;

    Ok(Member::reconstitute(
        MemberId::from_uuid(id),
        TenantId::from_uuid(tenant_id),
        name,
        contact,
        push_token,
    ))
}
