use crate::error::BookliError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_resource::*;
use bookli_domain::{Resource, ID};
use bookli_infra::BookliContext;

pub async fn get_resource_controller(
    _http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let usecase = GetResourceUseCase {
        resource_id: path_params.resource_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|resource| HttpResponse::Ok().json(APIResponse::new(resource)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct GetResourceUseCase {
    pub resource_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(resource_id) => Self::NotFound(format!(
                "The resource with id: {}, was not found.",
                resource_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetResourceUseCase {
    type Response = Resource;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.resources.find(&self.resource_id).await {
            Some(resource) => Ok(resource),
            None => Err(UseCaseErrors::NotFound(self.resource_id.clone())),
        }
    }
}
