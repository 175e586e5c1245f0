use crate::error::BookliError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_booking_slots::*;
use bookli_domain::{
    booking_slots::{
        get_booking_slots, validate_bookingslots_query, BookingQueryError, BookingSlot,
        BookingSlotsQuery,
    },
    TimeSpan, ID,
};
use bookli_infra::BookliContext;

pub async fn get_booking_slots_controller(
    _http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let usecase = GetBookingSlotsUseCase {
        resource_id: path_params.resource_id.clone(),
        date: query_params.date.clone(),
        duration: query_params.duration,
    };

    execute(usecase, &ctx)
        .await
        .map(|slots| {
            HttpResponse::Ok().json(APIResponse::new(query_params.date.clone(), slots))
        })
        .map_err(|e| match e {
            UseCaseErrors::InvalidDate(msg) => BookliError::BadClientData(format!(
                "Invalid datetime: {}. Should be YYYY-MM-DD, e.g. January 1. 2020 => 2020-1-1",
                msg
            )),
            UseCaseErrors::InvalidDuration => BookliError::BadClientData(
                "Invalid duration specified. It should be between 15 minutes and 10 hours inclusively and be specified as milliseconds.".into()
            ),
            UseCaseErrors::ResourceNotFound(resource_id) => BookliError::NotFound(format!(
                "The resource with id: {}, was not found.",
                resource_id
            )),
        })
}

/// Enumerates the free slots of a resource on a date by subtracting
/// its active reservations from the business-hours window. The result
/// is a point-in-time snapshot: it may race with concurrent bookings
/// and the caller has to re-validate through reservation creation,
/// which stays authoritative.
#[derive(Debug)]
pub struct GetBookingSlotsUseCase {
    pub resource_id: ID,
    pub date: String,
    pub duration: i64,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    ResourceNotFound(ID),
    InvalidDuration,
    InvalidDate(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBookingSlotsUseCase {
    type Response = Vec<BookingSlot>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let query = BookingSlotsQuery {
            date: self.date.clone(),
            duration: self.duration,
        };
        let options = match validate_bookingslots_query(&query, &ctx.config.business_hours) {
            Ok(options) => options,
            Err(BookingQueryError::InvalidDuration) => {
                return Err(UseCaseErrors::InvalidDuration)
            }
            Err(BookingQueryError::InvalidDate(d)) => return Err(UseCaseErrors::InvalidDate(d)),
        };

        if ctx.repos.resources.find(&self.resource_id).await.is_none() {
            return Err(UseCaseErrors::ResourceNotFound(self.resource_id.clone()));
        }

        let window = TimeSpan::new(options.open_ts, options.close_ts)
            .expect("Business hours window to be a valid timespan");
        let busy = ctx
            .repos
            .reservations
            .find_overlapping(&self.resource_id, &window, None)
            .await
            .into_iter()
            .map(|r| r.time)
            .collect::<Vec<_>>();

        Ok(get_booking_slots(&busy, &options))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reservation::create_reservation::CreateReservationUseCase;
    use bookli_domain::{Resource, ResourceType};
    use bookli_infra::setup_context;
    use chrono::TimeZone;

    const HOUR: i64 = 1000 * 60 * 60;

    fn ts(hour: u32) -> i64 {
        chrono::Utc
            .ymd(2025, 6, 10)
            .and_hms(hour, 0, 0)
            .timestamp_millis()
    }

    #[actix_web::test]
    async fn excludes_booked_windows_from_suggestions() {
        let ctx = setup_context().await;
        let resource = Resource::new("Room-A", ResourceType::MeetingRoom, 8);
        ctx.repos.resources.insert(&resource).await.unwrap();

        // Reserve 09:00-10:00 UTC
        let create = CreateReservationUseCase {
            resource_id: resource.id.clone(),
            requester_id: Default::default(),
            start_ts: ts(9),
            end_ts: ts(10),
            attendees: Vec::new(),
            note: None,
        };
        execute(create, &ctx).await.unwrap();

        let usecase = GetBookingSlotsUseCase {
            resource_id: resource.id.clone(),
            date: "2025-06-10".into(),
            duration: HOUR,
        };
        let slots = execute(usecase, &ctx).await.unwrap();

        // No suggested slot may overlap the reservation or leave the
        // business window.
        assert!(!slots.is_empty());
        assert!(!slots.iter().any(|s| s.start_ts < ts(10) && s.end_ts > ts(9)));
        assert!(slots.iter().any(|s| s.start_ts == ts(10) && s.end_ts == ts(11)));
        assert!(slots.iter().any(|s| s.start_ts == ts(8)));
        assert!(slots.iter().all(|s| s.end_ts <= ts(18)));
    }

    #[actix_web::test]
    async fn rejects_invalid_queries() {
        let ctx = setup_context().await;
        let resource = Resource::new("Room-A", ResourceType::MeetingRoom, 8);
        ctx.repos.resources.insert(&resource).await.unwrap();

        let usecase = GetBookingSlotsUseCase {
            resource_id: resource.id.clone(),
            date: "2025-13-40".into(),
            duration: HOUR,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::InvalidDate(_))
        ));

        let usecase = GetBookingSlotsUseCase {
            resource_id: resource.id.clone(),
            date: "2025-06-10".into(),
            duration: 1000,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::InvalidDuration)
        ));

        let usecase = GetBookingSlotsUseCase {
            resource_id: Default::default(),
            date: "2025-06-10".into(),
            duration: HOUR,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::ResourceNotFound(_))
        ));
    }
}
