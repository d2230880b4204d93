//! Member entity.
//!
//! Registration and authentication live outside the engine; the coordinator
//! only needs a member's tenant (for the isolation check) and their
//! name/contact details (for participant listings and notification
//! recipients).

use crate::domain::foundation::{MemberId, TenantId, ValidationError};
use serde::{Deserialize, Serialize};

/// A member of one tenant. Session leaders are members too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for this member.
    id: MemberId,

    /// Tenant the member belongs to.
    tenant_id: TenantId,

    /// Display name.
    name: String,

    /// Contact address (email).
    contact: String,

    /// Push delivery token, if the member registered a device.
    push_token: Option<String>,
}

impl Member {
    /// Create a new member.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name or contact is blank
    pub fn new(
        id: MemberId,
        tenant_id: TenantId,
        name: String,
        contact: String,
        push_token: Option<String>,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if contact.trim().is_empty() {
            return Err(ValidationError::empty_field("contact"));
        }

        Ok(Self {
            id,
            tenant_id,
            name,
            contact,
            push_token,
        })
    }

    /// Rebuild a member from already-persisted state.
    pub fn reconstitute(
        id: MemberId,
        tenant_id: TenantId,
        name: String,
        contact: String,
        push_token: Option<String>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            name,
            contact,
            push_token,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn push_token(&self) -> Option<&str> {
        self.push_token.as_deref()
    }

    /// True if the member belongs to the given tenant.
    pub fn belongs_to(&self, tenant_id: &TenantId) -> bool {
        &self.tenant_id == tenant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_keeps_fields() {
        let tenant = TenantId::new();
        let member = Member::new(
            MemberId::new(),
            tenant,
            "Mina Park".to_string(),
            "mina@example.com".to_string(),
            Some("token-1".to_string()),
        )
        .unwrap();
        assert_eq!(member.name(), "Mina Park");
        assert_eq!(member.push_token(), Some("token-1"));
        assert!(member.belongs_to(&tenant));
        assert!(!member.belongs_to(&TenantId::new()));
    }

    #[test]
    fn new_member_rejects_blank_name() {
        let result = Member::new(
            MemberId::new(),
            TenantId::new(),
            "  ".to_string(),
            "mina@example.com".to_string(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_member_rejects_blank_contact() {
        let result = Member::new(
            MemberId::new(),
            TenantId::new(),
            "Mina Park".to_string(),
            "".to_string(),
            None,
        );
        assert!(result.is_err());
    }
}
