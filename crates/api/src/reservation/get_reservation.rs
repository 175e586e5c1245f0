use crate::error::BookliError;
use crate::shared::{
    auth::{protect_route, Permission, Policy},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_reservation::*;
use bookli_domain::{Reservation, ID};
use bookli_infra::BookliContext;

pub async fn get_reservation_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let (requester_id, policy) = protect_route(&http_req, &ctx)?;

    let usecase = GetReservationUseCase {
        reservation_id: path_params.reservation_id.clone(),
        requester_id,
        policy,
    };

    execute(usecase, &ctx)
        .await
        .map(|reservation| HttpResponse::Ok().json(APIResponse::new(reservation)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct GetReservationUseCase {
    pub reservation_id: ID,
    pub requester_id: ID,
    pub policy: Policy,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    NotOwner,
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(reservation_id) => Self::NotFound(format!(
                "The reservation with id: {}, was not found.",
                reservation_id
            )),
            UseCaseErrors::NotOwner => {
                Self::Unauthorized("The reservation belongs to another requester".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReservationUseCase {
    type Response = Reservation;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let reservation = match ctx.repos.reservations.find(&self.reservation_id).await {
            Some(reservation) => reservation,
            None => return Err(UseCaseErrors::NotFound(self.reservation_id.clone())),
        };

        if reservation.requester_id != self.requester_id
            && !self.policy.authorize(&[Permission::ReadAnyReservation])
        {
            return Err(UseCaseErrors::NotOwner);
        }

        Ok(reservation)
    }
}
