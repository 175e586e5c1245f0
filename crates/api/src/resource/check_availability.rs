use crate::error::BookliError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::check_availability::*;
use bookli_domain::{Reservation, TimeSpan, ID};
use bookli_infra::BookliContext;

pub async fn check_availability_controller(
    _http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let usecase = CheckAvailabilityUseCase {
        resource_id: path_params.resource_id.clone(),
        start_ts: query_params.start_ts,
        end_ts: query_params.end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.available, res.conflicts)))
        .map_err(BookliError::from)
}

/// Read-only availability probe. Uses the same overlap predicate as
/// reservation creation, so an `available` answer can only be
/// invalidated by a booking committed after this snapshot, never by
/// one it failed to see.
#[derive(Debug)]
pub struct CheckAvailabilityUseCase {
    pub resource_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub available: bool,
    pub conflicts: Vec<Reservation>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidTimespan(i64, i64),
    ResourceNotFound(ID),
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::InvalidTimespan(start_ts, end_ts) => Self::BadClientData(format!(
                "Invalid timespan: startTs {} must be before endTs {}",
                start_ts, end_ts
            )),
            UseCaseErrors::ResourceNotFound(resource_id) => Self::NotFound(format!(
                "The resource with id: {}, was not found.",
                resource_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckAvailabilityUseCase {
    type Response = UseCaseRes;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let span = TimeSpan::new(self.start_ts, self.end_ts)
            .map_err(|_| UseCaseErrors::InvalidTimespan(self.start_ts, self.end_ts))?;

        if ctx.repos.resources.find(&self.resource_id).await.is_none() {
            return Err(UseCaseErrors::ResourceNotFound(self.resource_id.clone()));
        }

        let conflicts = ctx
            .repos
            .reservations
            .find_overlapping(&self.resource_id, &span, None)
            .await;

        Ok(UseCaseRes {
            available: conflicts.is_empty(),
            conflicts,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reservation::create_reservation::CreateReservationUseCase;
    use crate::reservation::cancel_reservation::CancelReservationUseCase;
    use crate::shared::auth::Policy;
    use bookli_domain::{Resource, ResourceType};
    use bookli_infra::setup_context;

    const HOUR: i64 = 1000 * 60 * 60;

    #[actix_web::test]
    async fn reflects_reservation_lifecycle() {
        let ctx = setup_context().await;
        let resource = Resource::new("Room-C", ResourceType::MeetingRoom, 6);
        ctx.repos.resources.insert(&resource).await.unwrap();

        let mut usecase = CheckAvailabilityUseCase {
            resource_id: resource.id.clone(),
            start_ts: 0,
            end_ts: HOUR,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.available);
        assert!(res.conflicts.is_empty());

        let create = CreateReservationUseCase {
            resource_id: resource.id.clone(),
            requester_id: Default::default(),
            start_ts: 0,
            end_ts: HOUR,
            attendees: Vec::new(),
            note: None,
        };
        let reservation = execute(create, &ctx).await.unwrap();

        // The created reservation is reported as the conflict
        let mut usecase = CheckAvailabilityUseCase {
            resource_id: resource.id.clone(),
            start_ts: 0,
            end_ts: HOUR,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.available);
        assert_eq!(res.conflicts.len(), 1);
        assert_eq!(res.conflicts[0].id, reservation.id);

        let cancel = CancelReservationUseCase {
            reservation_id: reservation.id.clone(),
            requester_id: reservation.requester_id.clone(),
            policy: Policy::default(),
        };
        execute(cancel, &ctx).await.unwrap();

        let mut usecase = CheckAvailabilityUseCase {
            resource_id: resource.id.clone(),
            start_ts: 0,
            end_ts: HOUR,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.available);
    }

    #[actix_web::test]
    async fn rejects_malformed_queries() {
        let ctx = setup_context().await;
        let resource = Resource::new("Room-C", ResourceType::MeetingRoom, 6);
        ctx.repos.resources.insert(&resource).await.unwrap();

        let mut usecase = CheckAvailabilityUseCase {
            resource_id: resource.id.clone(),
            start_ts: HOUR,
            end_ts: 0,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidTimespan(_, _))
        ));

        let mut usecase = CheckAvailabilityUseCase {
            resource_id: Default::default(),
            start_ts: 0,
            end_ts: HOUR,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::ResourceNotFound(_))
        ));
    }
}
