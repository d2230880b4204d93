//! Entitlement aggregate - the pass ledger.
//!
//! An entitlement is a per-member, per-tenant allotment of session uses with
//! a fixed expiry date. Its `remaining` balance is mutated only by the
//! reservation coordinator, under the entitlement's exclusive lock; purchase
//! and replenishment happen in an external flow.

use crate::domain::foundation::{
    EntitlementId, MemberId, ReservationError, TenantId, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entitlement aggregate - a consumable balance of session uses.
///
/// # Invariants
///
/// - `remaining <= total_granted`
/// - Once `expires_on` has passed, the balance is unusable regardless of
///   what remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Unique identifier for this entitlement.
    id: EntitlementId,

    /// Tenant the entitlement is valid in.
    tenant_id: TenantId,

    /// Member who holds the balance.
    holder_id: MemberId,

    /// Uses granted at purchase time.
    total_granted: u32,

    /// Uses left.
    remaining: u32,

    /// Last day the entitlement is usable.
    expires_on: NaiveDate,
}

impl Entitlement {
    /// Create a new entitlement with its full balance available.
    ///
    /// # Errors
    ///
    /// - `BelowMinimum` if zero uses are granted
    pub fn new(
        id: EntitlementId,
        tenant_id: TenantId,
        holder_id: MemberId,
        total_granted: u32,
        expires_on: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if total_granted == 0 {
            return Err(ValidationError::below_minimum("total_granted", 1, 0));
        }

        Ok(Self {
            id,
            tenant_id,
            holder_id,
            total_granted,
            remaining: total_granted,
            expires_on,
        })
    }

    /// Reconstitute an entitlement from persistence (no validation).
    pub fn reconstitute(
        id: EntitlementId,
        tenant_id: TenantId,
        holder_id: MemberId,
        total_granted: u32,
        remaining: u32,
        expires_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            tenant_id,
            holder_id,
            total_granted,
            remaining,
            expires_on,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &EntitlementId {
        &self.id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn holder_id(&self) -> &MemberId {
        &self.holder_id
    }

    pub fn total_granted(&self) -> u32 {
        self.total_granted
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn expires_on(&self) -> NaiveDate {
        self.expires_on
    }

    /// True if the entitlement can still be consumed today.
    pub fn is_usable(&self, today: NaiveDate) -> bool {
        self.expires_on >= today && self.remaining > 0
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Spend one use, returning the new balance.
    ///
    /// Expiry is checked before the balance, so an expired pass reports
    /// `EntitlementExpired` even when uses remain. Safe only while the caller
    /// holds the exclusive lock on this entitlement.
    ///
    /// # Errors
    ///
    /// - `EntitlementExpired` if `expires_on` has passed; no mutation occurs
    /// - `EntitlementExhausted` if no uses remain; no mutation occurs
    pub fn try_consume(&mut self, today: NaiveDate) -> Result<u32, ReservationError> {
        if self.expires_on < today {
            return Err(ReservationError::EntitlementExpired {
                entitlement: self.id,
                expired_on: self.expires_on,
            });
        }
        if self.remaining == 0 {
            return Err(ReservationError::EntitlementExhausted(self.id));
        }

        self.remaining -= 1;
        Ok(self.remaining)
    }
}
