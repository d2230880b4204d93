//! ReservationCoordinator - the atomic reservation unit.
//!
//! Orchestrates validation, lock acquisition, the two counter mutations, the
//! record insert, and the post-commit notifications. Locks are always taken
//! session first, entitlement second; that single global order is what makes
//! the engine deadlock-free.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;

use crate::application::dispatcher::{MessageTemplate, NotificationDispatcher, OutboundNotification};
use crate::application::locks::ResourceLocks;
use crate::domain::foundation::{LockedResource, MemberId, ReservationError, ReservationId, SessionId};
use crate::domain::member::Member;
use crate::domain::reservation::Reservation;
use crate::ports::{
    EntitlementRepository, MemberRepository, ReservationRepository, ReservationWriter,
    SessionRepository,
};

static MEMBER_CONFIRMED_BODY: Lazy<MessageTemplate> =
    Lazy::new(|| MessageTemplate::new("Your seat for #{session} is booked."));
static LEADER_ALERT_BODY: Lazy<MessageTemplate> =
    Lazy::new(|| MessageTemplate::new("#{member} joined #{session}."));

/// Coordinator for the reservation unit.
///
/// Owns no state of its own; everything mutable lives behind the ports and
/// the lock registry.
pub struct ReservationCoordinator {
    members: Arc<dyn MemberRepository>,
    sessions: Arc<dyn SessionRepository>,
    entitlements: Arc<dyn EntitlementRepository>,
    reservations: Arc<dyn ReservationRepository>,
    writer: Arc<dyn ReservationWriter>,
    locks: Arc<ResourceLocks>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl ReservationCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn SessionRepository>,
        entitlements: Arc<dyn EntitlementRepository>,
        reservations: Arc<dyn ReservationRepository>,
        writer: Arc<dyn ReservationWriter>,
        locks: Arc<ResourceLocks>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            members,
            sessions,
            entitlements,
            reservations,
            writer,
            locks,
            dispatcher,
        }
    }

    /// Reserve a seat in `session_id` for `member_id`, spending one
    /// entitlement use.
    ///
    /// Either the seat is taken, the use is spent, and the record exists —
    /// or nothing changed. Notifications go out only after commit and never
    /// affect the result.
    ///
    /// # Errors
    ///
    /// See the engine taxonomy: `MemberNotFound`, `SessionNotFound`,
    /// `AccessDenied`, `AlreadyEnrolled`, `EntitlementNotFound`,
    /// `ContentionTimeout`, `CapacityExceeded`, `EntitlementExhausted`,
    /// `EntitlementExpired`, `Storage`.
    pub async fn reserve(
        &self,
        member_id: MemberId,
        session_id: SessionId,
    ) -> Result<ReservationId, ReservationError> {
        // 1. Resolve member and session.
        let member = self
            .members
            .find_by_id(&member_id)
            .await?
            .ok_or(ReservationError::MemberNotFound(member_id))?;

        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(ReservationError::SessionNotFound(session_id))?;

        // 2. A reservation must never cross organizational boundaries.
        if !member.belongs_to(session.tenant_id()) {
            return Err(ReservationError::AccessDenied(
                "member and session belong to different tenants".to_string(),
            ));
        }

        // 3. Duplicate fast path, before any lock is taken.
        if self.reservations.exists_for(&session_id, &member_id).await? {
            return Err(ReservationError::AlreadyEnrolled {
                session: session_id,
                member: member_id,
            });
        }

        let entitlement = self
            .entitlements
            .find_for_member(&member_id, session.tenant_id())
            .await?
            .ok_or(ReservationError::EntitlementNotFound {
                member: member_id,
                tenant: *session.tenant_id(),
            })?;
        let entitlement_id = *entitlement.id();

        // 4. Lock order: session before entitlement, at every call site.
        let _session_guard = self
            .locks
            .acquire(*session_id.as_uuid(), LockedResource::Session)
            .await?;
        let _entitlement_guard = self
            .locks
            .acquire(*entitlement_id.as_uuid(), LockedResource::Entitlement)
            .await?;

        // Both counters may have moved while we waited; reload under lock.
        let mut session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(ReservationError::SessionNotFound(session_id))?;
        let mut entitlement = self
            .entitlements
            .find_by_id(&entitlement_id)
            .await?
            .ok_or(ReservationError::EntitlementNotFound {
                member: member_id,
                tenant: *session.tenant_id(),
            })?;

        // 5-6. Mutate local copies only; a rejection here leaves persisted
        // state untouched, so the seat increment can never leak past a
        // failed consume.
        let occupied = session.try_occupy()?;
        let remaining = entitlement.try_consume(Utc::now().date_naive())?;

        // 7. The record joins the unit.
        let reservation = Reservation::new(ReservationId::new(), session_id, member_id, Utc::now());
        let reservation_id = *reservation.id();

        // 8. One atomic commit; the writer re-enforces pair uniqueness.
        self.writer
            .commit(&session, &entitlement, &reservation)
            .await?;

        tracing::info!(
            %session_id,
            %member_id,
            %reservation_id,
            occupied,
            remaining,
            "reservation committed"
        );

        self.notify_after_commit(&member, &session, reservation_id)
            .await;

        Ok(reservation_id)
    }

    /// Enqueue the member confirmation and the leader alert.
    ///
    /// Strictly post-commit and best-effort: a missing leader row or a full
    /// queue is logged and forgotten.
    async fn notify_after_commit(
        &self,
        member: &Member,
        session: &crate::domain::session::Session,
        reservation_id: ReservationId,
    ) {
        self.dispatcher.enqueue(OutboundNotification {
            recipient: recipient_for(member),
            title: "Reservation confirmed".to_string(),
            body: MEMBER_CONFIRMED_BODY.render(&[("session", session.title())]),
        });

        match self.members.find_by_id(session.leader_id()).await {
            Ok(Some(leader)) => {
                self.dispatcher.enqueue(OutboundNotification {
                    recipient: recipient_for(&leader),
                    title: "New reservation".to_string(),
                    body: LEADER_ALERT_BODY
                        .render(&[("member", member.name()), ("session", session.title())]),
                });
            }
            Ok(None) => {
                tracing::warn!(
                    leader_id = %session.leader_id(),
                    %reservation_id,
                    "session leader not found; skipping leader alert"
                );
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    %reservation_id,
                    "leader lookup failed; skipping leader alert"
                );
            }
        }
    }
}

/// Channel-specific recipient: the push token when the member registered a
/// device, their contact address otherwise.
fn recipient_for(member: &Member) -> String {
    member
        .push_token()
        .unwrap_or_else(|| member.contact())
        .to_string()
}
