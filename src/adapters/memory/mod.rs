//! In-Memory Store Adapter
//!
//! Backs every persistence port with plain maps behind one RwLock.
//! Useful for testing and development.
//!
//! A single lock over all four maps is deliberate: `commit` must make the
//! seat count, the entitlement balance, and the reservation record land
//! together, and one write guard gives that atomicity without transactions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{
    EntitlementId, MemberId, ReservationError, ReservationId, SessionId, TenantId,
};
use crate::domain::member::Member;
use crate::domain::reservation::{AttendanceMark, Reservation};
use crate::domain::session::Session;
use crate::ports::{
    EntitlementRepository, MemberRepository, ParticipantRecord, ReservationRepository,
    ReservationWriter, SessionRepository,
};

#[derive(Debug, Default)]
struct StoreInner {
    sessions: HashMap<SessionId, Session>,
    entitlements: HashMap<EntitlementId, Entitlement>,
    reservations: HashMap<ReservationId, Reservation>,
    members: HashMap<MemberId, Member>,
}

/// In-memory implementation of every persistence port.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        *inner = StoreInner::default();
    }

    /// Number of stored reservation records.
    pub async fn reservation_count(&self) -> usize {
        self.inner.read().await.reservations.len()
    }

    /// Insert a reservation record directly, bypassing the coordinator.
    ///
    /// Test seeding only; no uniqueness check, no counter movement.
    pub async fn insert_reservation_unchecked(&self, reservation: &Reservation) {
        let mut inner = self.inner.write().await;
        inner
            .reservations
            .insert(*reservation.id(), reservation.clone());
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn insert(&self, session: &Session) -> Result<(), ReservationError> {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, ReservationError> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.get(id).cloned())
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryStore {
    async fn insert(&self, entitlement: &Entitlement) -> Result<(), ReservationError> {
        let mut inner = self.inner.write().await;
        inner
            .entitlements
            .insert(*entitlement.id(), entitlement.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &EntitlementId,
    ) -> Result<Option<Entitlement>, ReservationError> {
        let inner = self.inner.read().await;
        Ok(inner.entitlements.get(id).cloned())
    }

    async fn find_for_member(
        &self,
        member_id: &MemberId,
        tenant_id: &TenantId,
    ) -> Result<Option<Entitlement>, ReservationError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entitlements
            .values()
            .filter(|e| e.holder_id() == member_id && e.tenant_id() == tenant_id)
            .max_by_key(|e| e.expires_on())
            .cloned())
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn insert(&self, member: &Member) -> Result<(), ReservationError> {
        let mut inner = self.inner.write().await;
        inner.members.insert(*member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, ReservationError> {
        let inner = self.inner.read().await;
        Ok(inner.members.get(id).cloned())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn exists_for(
        &self,
        session_id: &SessionId,
        member_id: &MemberId,
    ) -> Result<bool, ReservationError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reservations
            .values()
            .any(|r| r.session_id() == session_id && r.member_id() == member_id))
    }

    async fn find_by_id(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, ReservationError> {
        let inner = self.inner.read().await;
        Ok(inner.reservations.get(id).cloned())
    }

    async fn update_attendance(
        &self,
        id: &ReservationId,
        mark: AttendanceMark,
    ) -> Result<(), ReservationError> {
        let mut inner = self.inner.write().await;
        let reservation = inner
            .reservations
            .get_mut(id)
            .ok_or(ReservationError::ReservationNotFound(*id))?;
        reservation.mark_attendance(mark);
        Ok(())
    }

    async fn list_participants(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ParticipantRecord>, ReservationError> {
        let inner = self.inner.read().await;

        let mut reservations: Vec<&Reservation> = inner
            .reservations
            .values()
            .filter(|r| r.session_id() == session_id)
            .collect();
        reservations.sort_by_key(|r| *r.created_at());

        reservations
            .into_iter()
            .map(|r| {
                let member = inner.members.get(r.member_id()).ok_or_else(|| {
                    ReservationError::Storage(format!(
                        "reservation {} references missing member {}",
                        r.id(),
                        r.member_id()
                    ))
                })?;
                Ok(ParticipantRecord {
                    reservation_id: *r.id(),
                    member_name: member.name().to_string(),
                    member_contact: member.contact().to_string(),
                    attendance_mark: r.attendance_mark(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl ReservationWriter for InMemoryStore {
    async fn commit(
        &self,
        session: &Session,
        entitlement: &Entitlement,
        reservation: &Reservation,
    ) -> Result<(), ReservationError> {
        let mut inner = self.inner.write().await;

        // The same pair-uniqueness rule a relational schema would enforce
        // with a constraint; rechecked here because the pre-lock existence
        // check raced with other writers.
        let duplicate = inner.reservations.values().any(|r| {
            r.session_id() == reservation.session_id() && r.member_id() == reservation.member_id()
        });
        if duplicate {
            return Err(ReservationError::AlreadyEnrolled {
                session: *reservation.session_id(),
                member: *reservation.member_id(),
            });
        }

        inner.sessions.insert(*session.id(), session.clone());
        inner
            .entitlements
            .insert(*entitlement.id(), entitlement.clone());
        inner
            .reservations
            .insert(*reservation.id(), reservation.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};

    fn sample_member(tenant: TenantId) -> Member {
        Member::new(
            MemberId::new(),
            tenant,
            "Mina Park".to_string(),
            "mina@example.com".to_string(),
            None,
        )
        .unwrap()
    }

    fn sample_session(tenant: TenantId, leader: MemberId) -> Session {
        let start = Utc::now() + Duration::hours(1);
        Session::new(
            SessionId::new(),
            tenant,
            leader,
            "Morning Flow".to_string(),
            5,
            start,
            start + Duration::hours(1),
        )
        .unwrap()
    }

    fn sample_entitlement(tenant: TenantId, holder: MemberId, expires_on: NaiveDate) -> Entitlement {
        Entitlement::new(EntitlementId::new(), tenant, holder, 10, expires_on).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn session_round_trips() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new();
        let session = sample_session(tenant, MemberId::new());

        SessionRepository::insert(&store, &session).await.unwrap();
        let loaded = SessionRepository::find_by_id(&store, session.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn missing_session_is_none() {
        let store = InMemoryStore::new();
        let loaded = SessionRepository::find_by_id(&store, &SessionId::new())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn find_for_member_prefers_latest_expiry() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new();
        let holder = MemberId::new();

        let near = sample_entitlement(tenant, holder, date("2026-09-01"));
        let far = sample_entitlement(tenant, holder, date("2026-12-01"));
        EntitlementRepository::insert(&store, &near).await.unwrap();
        EntitlementRepository::insert(&store, &far).await.unwrap();

        let found = store
            .find_for_member(&holder, &tenant)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), far.id());
    }

    #[tokio::test]
    async fn find_for_member_ignores_other_tenants() {
        let store = InMemoryStore::new();
        let holder = MemberId::new();

        let other = sample_entitlement(TenantId::new(), holder, date("2026-12-01"));
        EntitlementRepository::insert(&store, &other).await.unwrap();

        let found = store.find_for_member(&holder, &TenantId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn commit_rejects_duplicate_pair() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new();
        let member = sample_member(tenant);
        let session = sample_session(tenant, MemberId::new());
        let entitlement = sample_entitlement(tenant, *member.id(), date("2026-12-01"));

        let first = Reservation::new(
            ReservationId::new(),
            *session.id(),
            *member.id(),
            Utc::now(),
        );
        store
            .commit(&session, &entitlement, &first)
            .await
            .unwrap();

        let second = Reservation::new(
            ReservationId::new(),
            *session.id(),
            *member.id(),
            Utc::now(),
        );
        let result = store.commit(&session, &entitlement, &second).await;
        assert!(matches!(
            result,
            Err(ReservationError::AlreadyEnrolled { .. })
        ));
        assert_eq!(store.reservation_count().await, 1);
    }

    #[tokio::test]
    async fn update_attendance_requires_existing_record() {
        let store = InMemoryStore::new();
        let result = store
            .update_attendance(&ReservationId::new(), AttendanceMark::Attended)
            .await;
        assert!(matches!(
            result,
            Err(ReservationError::ReservationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_participants_orders_by_reservation_time() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new();
        let session = sample_session(tenant, MemberId::new());
        SessionRepository::insert(&store, &session).await.unwrap();

        let base = Utc::now();
        for (offset, name) in [(2, "Third"), (0, "First"), (1, "Second")] {
            let member = Member::new(
                MemberId::new(),
                tenant,
                name.to_string(),
                format!("{}@example.com", name.to_lowercase()),
                None,
            )
            .unwrap();
            MemberRepository::insert(&store, &member).await.unwrap();
            let reservation = Reservation::new(
                ReservationId::new(),
                *session.id(),
                *member.id(),
                base + Duration::seconds(offset),
            );
            store.insert_reservation_unchecked(&reservation).await;
        }

        let roster = store.list_participants(session.id()).await.unwrap();
        let names: Vec<&str> = roster.iter().map(|p| p.member_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
