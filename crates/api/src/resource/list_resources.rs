use crate::error::BookliError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::list_resources::*;
use bookli_domain::Resource;
use bookli_infra::BookliContext;

pub async fn list_resources_controller(
    _http_req: HttpRequest,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let usecase = ListResourcesUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|resources| HttpResponse::Ok().json(APIResponse::new(resources)))
        .map_err(|_| BookliError::InternalError)
}

#[derive(Debug)]
pub struct ListResourcesUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for ListResourcesUseCase {
    type Response = Vec<Resource>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx.repos.resources.find_all().await)
    }
}
