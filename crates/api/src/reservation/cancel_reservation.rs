use super::subscribers::{
    SendCancellationOnReservationCancelled, VoidRemindersOnReservationCancelled,
};
use crate::error::BookliError;
use crate::shared::{
    auth::{protect_route, Permission, Policy},
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::cancel_reservation::*;
use bookli_domain::{Reservation, ReservationStatus, ID};
use bookli_infra::BookliContext;

pub async fn cancel_reservation_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let (requester_id, policy) = protect_route(&http_req, &ctx)?;

    let usecase = CancelReservationUseCase {
        reservation_id: path_params.reservation_id.clone(),
        requester_id,
        policy,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reservation)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct CancelReservationUseCase {
    pub reservation_id: ID,
    pub requester_id: ID,
    pub policy: Policy,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reservation: Reservation,
    /// Cancelling an already-cancelled reservation is a no-op success
    /// and must not re-run side effects.
    pub already_cancelled: bool,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    NotOwner,
    StorageError,
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(reservation_id) => Self::NotFound(format!(
                "The reservation with id: {}, was not found.",
                reservation_id
            )),
            UseCaseErrors::NotOwner => Self::Unauthorized(
                "Only the owner of the reservation is allowed to cancel it".into(),
            ),
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelReservationUseCase {
    type Response = UseCaseRes;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let reservation = match ctx.repos.reservations.find(&self.reservation_id).await {
            Some(reservation) => reservation,
            None => return Err(UseCaseErrors::NotFound(self.reservation_id.clone())),
        };

        if reservation.requester_id != self.requester_id
            && !self.policy.authorize(&[Permission::CancelAnyReservation])
        {
            return Err(UseCaseErrors::NotOwner);
        }

        if reservation.status == ReservationStatus::Cancelled {
            return Ok(UseCaseRes {
                reservation,
                already_cancelled: true,
            });
        }

        match ctx.repos.reservations.cancel(&self.reservation_id).await {
            Ok(Some(reservation)) => Ok(UseCaseRes {
                reservation,
                already_cancelled: false,
            }),
            Ok(None) => Err(UseCaseErrors::NotFound(self.reservation_id.clone())),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(VoidRemindersOnReservationCancelled),
            Box::new(SendCancellationOnReservationCancelled),
        ]
    }
}
