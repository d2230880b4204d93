//! Integration tests for the leader-facing roster operations.
//!
//! Reservations are created through the coordinator so the roster reflects
//! real committed records, then marked and listed through the handlers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};

use studiobook::adapters::memory::InMemoryStore;
use studiobook::application::{
    ListParticipantsHandler, MarkAttendanceHandler, NotificationDispatcher,
    ReservationCoordinator, ResourceLocks,
};
use studiobook::domain::entitlement::Entitlement;
use studiobook::domain::foundation::{
    EntitlementId, MemberId, ReservationError, ReservationId, SessionId, TenantId,
};
use studiobook::domain::member::Member;
use studiobook::domain::reservation::AttendanceMark;
use studiobook::domain::session::Session;
use studiobook::ports::{
    EntitlementRepository, MemberRepository, Notifier, NotifyError, SessionRepository,
};

struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

struct Fixture {
    store: Arc<InMemoryStore>,
    coordinator: ReservationCoordinator,
    tenant: TenantId,
    leader: MemberId,
    session: SessionId,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let coordinator = ReservationCoordinator::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(ResourceLocks::new(Duration::from_secs(1))),
        Arc::new(NotificationDispatcher::spawn(Arc::new(NullNotifier), 1, 16)),
    );

    let tenant = TenantId::new();
    let leader = seed_member(&store, tenant, "Joon Lee").await;

    let start = Utc::now() + ChronoDuration::hours(1);
    let session = Session::new(
        SessionId::new(),
        tenant,
        leader,
        "Evening Stretch".to_string(),
        8,
        start,
        start + ChronoDuration::hours(1),
    )
    .unwrap();
    let session_id = *session.id();
    SessionRepository::insert(&*store, &session).await.unwrap();

    Fixture {
        store,
        coordinator,
        tenant,
        leader,
        session: session_id,
    }
}

async fn seed_member(store: &InMemoryStore, tenant: TenantId, name: &str) -> MemberId {
    let member = Member::new(
        MemberId::new(),
        tenant,
        name.to_string(),
        format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        None,
    )
    .unwrap();
    let id = *member.id();
    MemberRepository::insert(store, &member).await.unwrap();
    id
}

fn far_expiry() -> NaiveDate {
    Utc::now().date_naive() + ChronoDuration::days(30)
}

async fn reserve_as(f: &Fixture, name: &str) -> (MemberId, ReservationId) {
    let member = seed_member(&f.store, f.tenant, name).await;
    let entitlement =
        Entitlement::new(EntitlementId::new(), f.tenant, member, 5, far_expiry()).unwrap();
    EntitlementRepository::insert(&*f.store, &entitlement)
        .await
        .unwrap();
    let reservation = f.coordinator.reserve(member, f.session).await.unwrap();
    (member, reservation)
}

#[tokio::test]
async fn leader_marks_and_corrects_attendance() {
    let f = fixture().await;
    let (_, reservation) = reserve_as(&f, "Mina Park").await;
    let handler = MarkAttendanceHandler::new(f.store.clone(), f.store.clone());

    handler
        .mark(f.leader, reservation, AttendanceMark::Absent)
        .await
        .unwrap();
    handler
        .mark(f.leader, reservation, AttendanceMark::Attended)
        .await
        .unwrap();

    let listing = ListParticipantsHandler::new(f.store.clone(), f.store.clone())
        .list(f.leader, f.session)
        .await
        .unwrap();
    assert_eq!(listing[0].attendance_mark, AttendanceMark::Attended);
}

#[tokio::test]
async fn participant_cannot_mark_their_own_attendance() {
    let f = fixture().await;
    let (member, reservation) = reserve_as(&f, "Mina Park").await;
    let handler = MarkAttendanceHandler::new(f.store.clone(), f.store.clone());

    let result = handler
        .mark(member, reservation, AttendanceMark::Attended)
        .await;
    assert!(matches!(result, Err(ReservationError::AccessDenied(_))));
}

#[tokio::test]
async fn roster_lists_participants_in_reservation_order() {
    let f = fixture().await;
    let (_, first) = reserve_as(&f, "Ana").await;
    let (_, second) = reserve_as(&f, "Ben").await;
    let (_, third) = reserve_as(&f, "Cho").await;

    let roster = ListParticipantsHandler::new(f.store.clone(), f.store.clone())
        .list(f.leader, f.session)
        .await
        .unwrap();

    let order: Vec<ReservationId> = roster.iter().map(|p| p.reservation_id).collect();
    assert_eq!(order, vec![first, second, third]);
    assert_eq!(roster[0].member_name, "Ana");
    assert!(roster[0].member_contact.contains('@'));
}

#[tokio::test]
async fn roster_is_leader_only() {
    let f = fixture().await;
    let (member, _) = reserve_as(&f, "Mina Park").await;

    let result = ListParticipantsHandler::new(f.store.clone(), f.store.clone())
        .list(member, f.session)
        .await;
    assert!(matches!(result, Err(ReservationError::AccessDenied(_))));
}

#[tokio::test]
async fn empty_roster_is_an_empty_list() {
    let f = fixture().await;

    let roster = ListParticipantsHandler::new(f.store.clone(), f.store.clone())
        .list(f.leader, f.session)
        .await
        .unwrap();
    assert!(roster.is_empty());
}
