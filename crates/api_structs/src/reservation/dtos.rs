use bookli_domain::{Reservation, ReservationStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDTO {
    pub id: ID,
    pub resource_id: ID,
    pub requester_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub status: ReservationStatus,
    pub attendees: Vec<String>,
    pub note: Option<String>,
    pub created: i64,
}

impl ReservationDTO {
    pub fn new(reservation: Reservation) -> Self {
        Self {
            id: reservation.id.clone(),
            resource_id: reservation.resource_id.clone(),
            requester_id: reservation.requester_id.clone(),
            start_ts: reservation.time.start(),
            end_ts: reservation.time.end(),
            status: reservation.status,
            attendees: reservation.attendees,
            note: reservation.note,
            created: reservation.created,
        }
    }
}
