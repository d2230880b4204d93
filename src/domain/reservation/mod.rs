//! Reservation record and attendance marking.
//!
//! A reservation is the durable join record between one session and one
//! member. It is created only by the coordinator as part of the atomic
//! reservation unit; the (session, member) pair is unique.

use crate::domain::foundation::{MemberId, ReservationId, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attendance state of a reservation.
///
/// Starts at `Pending`; the session leader overwrites it freely. There is no
/// ordering or time-window constraint on the transition — the mark can be set
/// before, during, or long after the session, and flipped at will.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMark {
    Pending,
    Attended,
    Absent,
}

impl AttendanceMark {
    /// Stable string form used in persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceMark::Pending => "pending",
            AttendanceMark::Attended => "attended",
            AttendanceMark::Absent => "absent",
        }
    }

    /// Parses the persisted string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AttendanceMark::Pending),
            "attended" => Some(AttendanceMark::Attended),
            "absent" => Some(AttendanceMark::Absent),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttendanceMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reservation - the durable record linking one session to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for this reservation.
    id: ReservationId,

    /// Session the seat was taken in.
    session_id: SessionId,

    /// Member holding the seat.
    member_id: MemberId,

    /// When the reservation was committed.
    created_at: DateTime<Utc>,

    /// Attendance state, leader-controlled.
    attendance_mark: AttendanceMark,
}

impl Reservation {
    /// Create a new pending reservation.
    pub fn new(
        id: ReservationId,
        session_id: SessionId,
        member_id: MemberId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            member_id,
            created_at,
            attendance_mark: AttendanceMark::Pending,
        }
    }

    /// Reconstitute a reservation from persistence.
    pub fn reconstitute(
        id: ReservationId,
        session_id: SessionId,
        member_id: MemberId,
        created_at: DateTime<Utc>,
        attendance_mark: AttendanceMark,
    ) -> Self {
        Self {
            id,
            session_id,
            member_id,
            created_at,
            attendance_mark,
        }
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn attendance_mark(&self) -> AttendanceMark {
        self.attendance_mark
    }

    /// Overwrite the attendance mark.
    ///
    /// Deliberately not a guarded state machine: re-settable at will, with
    /// authorization enforced by the caller.
    pub fn mark_attendance(&mut self, mark: AttendanceMark) {
        self.attendance_mark = mark;
    }
}
