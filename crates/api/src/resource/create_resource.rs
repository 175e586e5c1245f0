use crate::error::BookliError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::create_resource::*;
use bookli_domain::{Resource, ResourceType};
use bookli_infra::BookliContext;

pub async fn create_resource_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateResourceUseCase {
        name: body.name,
        resource_type: body.resource_type,
        capacity: body.capacity,
        features: body.features.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|resource| HttpResponse::Created().json(APIResponse::new(resource)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct CreateResourceUseCase {
    pub name: String,
    pub resource_type: ResourceType,
    pub capacity: i64,
    pub features: Vec<String>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidCapacity(i64),
    StorageError,
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::InvalidCapacity(capacity) => Self::BadClientData(format!(
                "Invalid capacity: {}, it must be a positive number",
                capacity
            )),
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateResourceUseCase {
    type Response = Resource;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        if self.capacity < 1 {
            return Err(UseCaseErrors::InvalidCapacity(self.capacity));
        }

        let mut resource = Resource::new(&self.name, self.resource_type, self.capacity);
        resource.features = self.features.clone();

        ctx.repos
            .resources
            .insert(&resource)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(resource)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_infra::setup_context;

    #[actix_web::test]
    async fn creates_resource_with_features() {
        let ctx = setup_context().await;

        let usecase = CreateResourceUseCase {
            name: "Desk 7".into(),
            resource_type: ResourceType::Desk,
            capacity: 1,
            features: vec!["standing".into()],
        };
        let resource = execute(usecase, &ctx).await.unwrap();
        assert!(resource.is_available);
        assert_eq!(
            ctx.repos.resources.find(&resource.id).await.unwrap().features,
            vec!["standing".to_string()]
        );
    }

    #[actix_web::test]
    async fn rejects_non_positive_capacity() {
        let ctx = setup_context().await;

        let usecase = CreateResourceUseCase {
            name: "Desk 7".into(),
            resource_type: ResourceType::Desk,
            capacity: 0,
            features: Vec::new(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::InvalidCapacity(_))
        ));
    }
}
