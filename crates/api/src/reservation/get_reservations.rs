use crate::error::BookliError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_reservations::*;
use bookli_domain::{Reservation, ID};
use bookli_infra::BookliContext;

pub async fn get_reservations_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let (requester_id, _policy) = protect_route(&http_req, &ctx)?;

    let usecase = GetReservationsUseCase { requester_id };

    execute(usecase, &ctx)
        .await
        .map(|reservations| HttpResponse::Ok().json(APIResponse::new(reservations)))
        .map_err(|_| BookliError::InternalError)
}

/// Lists the requester's own reservations, cancelled ones included
/// (they are part of the booking history).
#[derive(Debug)]
pub struct GetReservationsUseCase {
    pub requester_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReservationsUseCase {
    type Response = Vec<Reservation>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx
            .repos
            .reservations
            .find_by_requester(&self.requester_id)
            .await)
    }
}
