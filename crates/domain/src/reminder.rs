use crate::reservation::Reservation;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The points in a reservation's run-up at which the requester is
/// reminded of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    DayBefore,
    HourBefore,
}

impl ReminderKind {
    pub fn all() -> [ReminderKind; 2] {
        [Self::DayBefore, Self::HourBefore]
    }

    /// How long before the reservation start this reminder fires.
    pub fn offset_millis(&self) -> i64 {
        match self {
            Self::DayBefore => 1000 * 60 * 60 * 24,
            Self::HourBefore => 1000 * 60 * 60,
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let k = match self {
            Self::DayBefore => "day_before",
            Self::HourBefore => "hour_before",
        };
        write!(f, "{}", k)
    }
}

impl std::str::FromStr for ReminderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day_before" => Ok(Self::DayBefore),
            "hour_before" => Ok(Self::HourBefore),
            _ => Err(anyhow::Error::msg(format!("Unknown reminder kind: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Scheduled,
    Fired,
    Cancelled,
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::Fired => "fired",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "fired" => Ok(Self::Fired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::Error::msg(format!(
                "Unknown reminder status: {}",
                s
            ))),
        }
    }
}

/// A deferred, cancellable notification job tied to a reservation's
/// start time. Jobs live in a durable time-ordered table polled by the
/// scheduler loop, so they survive restarts and can be voided by a
/// concurrent cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Reservation` this `Reminder` is associated with
    pub reservation_id: ID,
    /// The timestamp in millis at which the reminder should be delivered
    pub remind_at: i64,
    pub kind: ReminderKind,
    pub status: ReminderStatus,
}

impl Reminder {
    /// Deterministic tag derived from `(reservation_id, kind)`. At most
    /// one job per tag exists, which makes scheduling and cancellation
    /// idempotent.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.reservation_id, self.kind)
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Computes the reminder jobs for a reservation. A kind whose fire-time
/// has already passed at scheduling time is skipped, not scheduled.
pub fn reminders_for_reservation(reservation: &Reservation, now: i64) -> Vec<Reminder> {
    ReminderKind::all()
        .iter()
        .filter_map(|kind| {
            let remind_at = reservation.time.start() - kind.offset_millis();
            if remind_at <= now {
                return None;
            }
            Some(Reminder {
                id: Default::default(),
                reservation_id: reservation.id.clone(),
                remind_at,
                kind: *kind,
                status: ReminderStatus::Scheduled,
            })
        })
        .collect()
}
