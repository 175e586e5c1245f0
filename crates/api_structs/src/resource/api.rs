use crate::dtos::{ReservationDTO, ResourceDTO};
use bookli_domain::booking_slots::BookingSlot;
use bookli_domain::{Reservation, Resource, ResourceType, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub resource: ResourceDTO,
}

impl ResourceResponse {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource: ResourceDTO::new(resource),
        }
    }
}

pub mod create_resource {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub resource_type: ResourceType,
        pub capacity: i64,
        pub features: Option<Vec<String>>,
    }

    pub type APIResponse = ResourceResponse;
}

pub mod get_resource {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub resource_id: ID,
    }

    pub type APIResponse = ResourceResponse;
}

pub mod list_resources {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub resources: Vec<ResourceDTO>,
    }

    impl APIResponse {
        pub fn new(resources: Vec<Resource>) -> Self {
            Self {
                resources: resources.into_iter().map(ResourceDTO::new).collect(),
            }
        }
    }
}

pub mod check_availability {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub resource_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub start_ts: i64,
        pub end_ts: i64,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub available: bool,
        pub conflicts: Vec<ReservationDTO>,
    }

    impl APIResponse {
        pub fn new(available: bool, conflicts: Vec<Reservation>) -> Self {
            Self {
                available,
                conflicts: conflicts.into_iter().map(ReservationDTO::new).collect(),
            }
        }
    }
}

pub mod get_booking_slots {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub resource_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub date: String,
        /// Requested slot duration in millis
        pub duration: i64,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
        pub slots: Vec<BookingSlot>,
    }

    impl APIResponse {
        pub fn new(date: String, slots: Vec<BookingSlot>) -> Self {
            Self { date, slots }
        }
    }
}
