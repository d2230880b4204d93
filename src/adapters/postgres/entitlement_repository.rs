//! PostgreSQL implementation of EntitlementRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::get;
use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{EntitlementId, MemberId, ReservationError, TenantId};
use crate::ports::EntitlementRepository;

/// PostgreSQL implementation of EntitlementRepository.
#[derive(Clone)]
pub struct PostgresEntitlementRepository {
    pool: PgPool,
}

impl PostgresEntitlementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementRepository for PostgresEntitlementRepository {
    async fn insert(&self, entitlement: &Entitlement) -> Result<(), ReservationError> {
        sqlx::query(
            r#"
            INSERT INTO entitlements (
                id, tenant_id, holder_id, total_granted, remaining, expires_on
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entitlement.id().as_uuid())
        .bind(entitlement.tenant_id().as_uuid())
        .bind(entitlement.holder_id().as_uuid())
        .bind(entitlement.total_granted() as i32)
        .bind(entitlement.remaining() as i32)
        .bind(entitlement.expires_on())
        .execute(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to insert entitlement: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &EntitlementId,
    ) -> Result<Option<Entitlement>, ReservationError> {
        let row = sqlx::query(
            r#"
            SELECT id, tenant_id, holder_id, total_granted, remaining, expires_on
            FROM entitlements
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReservationError::storage(format!("failed to fetch entitlement: {}", e)))?;

        row.map(row_to_entitlement).transpose()
    }

    async fn find_for_member(
        &self,
        member_id: &MemberId,
        tenant_id: &TenantId,
    ) -> Result<Option<Entitlement>, ReservationError> {
        // Latest expiry wins when a member holds several grants; usability
        // is judged later, under the lock.
        let row = sqlx::query(
            r#"
            SELECT id, tenant_id, holder_id, total_granted, remaining, expires_on
            FROM entitlements
            WHERE holder_id = $1 AND tenant_id = $2
            ORDER BY expires_on DESC
            LIMIT 1
            "#,
        )
        .bind(member_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            ReservationError::storage(format!("failed to fetch member entitlement: {}", e))
        })?;

        row.map(row_to_entitlement).transpose()
    }
}

fn row_to_entitlement(row: sqlx::postgres::PgRow) -> Result<Entitlement, ReservationError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let tenant_id: uuid::Uuid = get(&row, "tenant_id")?;
    let holder_id: uuid::Uuid = get(&row, "holder_id")?;
    let total_granted: i32 = get(&row, "total_granted")?;
    let remaining: i32 = get(&row, "remaining")?;
    let expires_on: chrono::NaiveDate = get(&row, "expires_on")?;

    Ok(Entitlement::reconstitute(
        EntitlementId::from_uuid(id),
        TenantId::from_uuid(tenant_id),
        MemberId::from_uuid(holder_id),
        total_granted as u32,
        remaining as u32,
        expires_on,
    ))
}
