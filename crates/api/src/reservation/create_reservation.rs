use super::subscribers::{
    ScheduleRemindersOnReservationCreated, SendConfirmationOnReservationCreated,
};
use crate::error::BookliError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::create_reservation::*;
use bookli_domain::{Reservation, ReservationStatus, TimeSpan, ID};
use bookli_infra::{BookliContext, ReservationInsert};

pub async fn create_reservation_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let (requester_id, _policy) = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateReservationUseCase {
        resource_id: body.resource_id,
        requester_id,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        attendees: body.attendees.unwrap_or_default(),
        note: body.note,
    };

    execute(usecase, &ctx)
        .await
        .map(|reservation| HttpResponse::Created().json(APIResponse::new(reservation)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct CreateReservationUseCase {
    pub resource_id: ID,
    pub requester_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub attendees: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidTimespan(i64, i64),
    ResourceNotFound(ID),
    Overbooked(Vec<Reservation>),
    StorageError,
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
            UseCaseErrors::Overbooked(conflicts) => Self::Conflict {
                message: "The resource is already booked for the requested timespan".into(),
                conflicts,
            },
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReservationUseCase {
    type Response = Reservation;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let time = TimeSpan::new(self.start_ts, self.end_ts)
            .map_err(|_| UseCaseErrors::InvalidTimespan(self.start_ts, self.end_ts))?;

        let resource = match ctx.repos.resources.find(&self.resource_id).await {
            Some(resource) => resource,
            None => return Err(UseCaseErrors::ResourceNotFound(self.resource_id.clone())),
        };

        let reservation = Reservation {
            id: Default::default(),
            resource_id: resource.id.clone(),
            requester_id: self.requester_id.clone(),
            time,
            status: ReservationStatus::Confirmed,
            attendees: self.attendees.clone(),
            note: self.note.clone(),
            created: ctx.sys.get_timestamp_millis(),
        };

        match ctx.repos.reservations.insert_if_vacant(&reservation).await {
            Ok(ReservationInsert::Inserted) => Ok(reservation),
            Ok(ReservationInsert::Conflict(conflicts)) => {
                Err(UseCaseErrors::Overbooked(conflicts))
            }
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(ScheduleRemindersOnReservationCreated),
            Box::new(SendConfirmationOnReservationCreated),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_domain::{Resource, ResourceType};
    use bookli_infra::setup_context;
    use futures::future::join_all;

    const HOUR: i64 = 1000 * 60 * 60;

    struct TestContext {
        ctx: BookliContext,
        resource: Resource,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context().await;
        let resource = Resource::new("Room-A", ResourceType::MeetingRoom, 8);
        ctx.repos.resources.insert(&resource).await.unwrap();

        TestContext { ctx, resource }
    }

    fn usecase_for(resource: &Resource, start_ts: i64, end_ts: i64) -> CreateReservationUseCase {
        CreateReservationUseCase {
            resource_id: resource.id.clone(),
            requester_id: Default::default(),
            start_ts,
            end_ts,
            attendees: vec!["guest@example.com".into()],
            note: None,
        }
    }

    #[actix_web::test]
    async fn creates_reservation() {
        let TestContext { ctx, resource } = setup().await;

        let mut usecase = usecase_for(&resource, 0, HOUR);
        let res = usecase.execute(&ctx).await;

        assert!(res.is_ok());
        let reservation = res.unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert!(ctx
            .repos
            .reservations
            .find(&reservation.id)
            .await
            .is_some());
        assert!(!ctx.repos.resources.find(&resource.id).await.unwrap().is_available);
    }

    #[actix_web::test]
    async fn rejects_invalid_timespan() {
        let TestContext { ctx, resource } = setup().await;

        let mut usecase = usecase_for(&resource, HOUR, 0);
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidTimespan(_, _))
        ));

        let mut usecase = usecase_for(&resource, HOUR, HOUR);
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::InvalidTimespan(_, _))
        ));
    }

    #[actix_web::test]
    async fn rejects_unknown_resource() {
        let TestContext { ctx, resource: _ } = setup().await;

        let unknown = Resource::new("Ghost", ResourceType::Desk, 1);
        let mut usecase = usecase_for(&unknown, 0, HOUR);
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseErrors::ResourceNotFound(_))
        ));
    }

    #[actix_web::test]
    async fn rejects_overlapping_reservation_and_returns_conflicts() {
        let TestContext { ctx, resource } = setup().await;

        let mut usecase = usecase_for(&resource, 0, HOUR);
        let first = usecase.execute(&ctx).await.unwrap();

        let mut usecase = usecase_for(&resource, HOUR / 2, HOUR + HOUR / 2);
        match usecase.execute(&ctx).await {
            Err(UseCaseErrors::Overbooked(conflicts)) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].id, first.id);
            }
            res => panic!("Expected overbooked, got {:?}", res.map(|r| r.id)),
        }

        // A touching timespan is not a conflict
        let mut usecase = usecase_for(&resource, HOUR, 2 * HOUR);
        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::test]
    async fn exactly_one_of_concurrent_creates_succeeds() {
        let TestContext { ctx, resource } = setup().await;

        let usecases = (0..5)
            .map(|_| usecase_for(&resource, 0, HOUR))
            .collect::<Vec<_>>();
        let outcomes = join_all(
            usecases
                .into_iter()
                .map(|usecase| execute(usecase, &ctx)),
        )
        .await;

        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        let conflicted = outcomes
            .iter()
            .filter(|o| matches!(o, Err(UseCaseErrors::Overbooked(_))))
            .count();
        assert_eq!(succeeded, 1);
        assert_eq!(conflicted, 4);
    }

    #[actix_web::test]
    async fn schedules_reminders_for_upcoming_reservation() {
        let TestContext { ctx, resource } = setup().await;

        let now = ctx.sys.get_timestamp_millis();
        let usecase = usecase_for(&resource, now + 25 * HOUR, now + 26 * HOUR);
        let reservation = execute(usecase, &ctx).await.unwrap();

        let jobs = ctx
            .repos
            .reminders
            .find_by_reservation(&reservation.id)
            .await;
        assert_eq!(jobs.len(), 2);
    }

    #[actix_web::test]
    async fn skips_reminders_with_elapsed_fire_times() {
        let TestContext { ctx, resource } = setup().await;

        let now = ctx.sys.get_timestamp_millis();
        let usecase = usecase_for(&resource, now + HOUR / 2, now + HOUR);
        let reservation = execute(usecase, &ctx).await.unwrap();

        assert!(ctx
            .repos
            .reminders
            .find_by_reservation(&reservation.id)
            .await
            .is_empty());
    }
}
