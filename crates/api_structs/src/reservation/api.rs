use crate::dtos::ReservationDTO;
use bookli_domain::{Reservation, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation: ReservationDTO,
}

impl ReservationResponse {
    pub fn new(reservation: Reservation) -> Self {
        Self {
            reservation: ReservationDTO::new(reservation),
        }
    }
}

pub mod create_reservation {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub resource_id: ID,
        pub start_ts: i64,
        pub end_ts: i64,
        pub attendees: Option<Vec<String>>,
        pub note: Option<String>,
    }

    pub type APIResponse = ReservationResponse;
}

pub mod cancel_reservation {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reservation_id: ID,
    }

    pub type APIResponse = ReservationResponse;
}

pub mod get_reservation {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reservation_id: ID,
    }

    pub type APIResponse = ReservationResponse;
}

pub mod get_reservations {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reservations: Vec<ReservationDTO>,
    }

    impl APIResponse {
        pub fn new(reservations: Vec<Reservation>) -> Self {
            Self {
                reservations: reservations.into_iter().map(ReservationDTO::new).collect(),
            }
        }
    }
}
