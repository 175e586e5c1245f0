use crate::shared::entity::{Entity, ID};
use crate::timespan::TimeSpan;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::Error::msg(format!(
                "Unknown reservation status: {}",
                s
            ))),
        }
    }
}

/// A time-bounded claim on a `Resource` by a requester.
///
/// Reservations are never physically deleted, cancellation is a status
/// transition and `cancelled` is terminal.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: ID,
    pub resource_id: ID,
    pub requester_id: ID,
    pub time: TimeSpan,
    pub status: ReservationStatus,
    pub attendees: Vec<String>,
    pub note: Option<String>,
    pub created: i64,
}

impl Reservation {
    /// Active reservations are the ones participating in conflict
    /// detection and slot search.
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }
}

impl Entity for Reservation {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cancelled_reservations_are_not_active() {
        let mut reservation = Reservation {
            id: Default::default(),
            resource_id: Default::default(),
            requester_id: Default::default(),
            time: TimeSpan::new(0, 10).unwrap(),
            status: ReservationStatus::Confirmed,
            attendees: Vec::new(),
            note: None,
            created: 0,
        };
        assert!(reservation.is_active());

        reservation.status = ReservationStatus::Cancelled;
        assert!(!reservation.is_active());

        reservation.status = ReservationStatus::Pending;
        assert!(reservation.is_active());
    }
}
