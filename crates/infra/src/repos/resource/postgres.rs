use super::IResourceRepo;
use bookli_domain::{Resource, ID};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use std::str::FromStr;

pub struct PostgresResourceRepo {
    pool: PgPool,
}

impl PostgresResourceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ResourceRaw {
    resource_uid: Uuid,
    name: String,
    resource_type: String,
    capacity: i64,
    is_available: bool,
    features: Vec<String>,
}

impl Into<Resource> for ResourceRaw {
    fn into(self) -> Resource {
        Resource {
            id: self.resource_uid.into(),
            resource_type: FromStr::from_str(&self.resource_type)
                .unwrap_or(bookli_domain::ResourceType::Desk),
            name: self.name,
            capacity: self.capacity,
            is_available: self.is_available,
            features: self.features,
        }
    }
}

#[async_trait::async_trait]
impl IResourceRepo for PostgresResourceRepo {
    async fn insert(&self, resource: &Resource) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resources(resource_uid, name, resource_type, capacity, is_available, features)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(resource.id.inner_ref())
        .bind(&resource.name)
        .bind(resource.resource_type.to_string())
        .bind(resource.capacity)
        .bind(resource.is_available)
        .bind(&resource.features)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, resource: &Resource) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE resources
            SET name = $2, resource_type = $3, capacity = $4, is_available = $5, features = $6
            WHERE resource_uid = $1
            "#,
        )
        .bind(resource.id.inner_ref())
        .bind(&resource.name)
        .bind(resource.resource_type.to_string())
        .bind(resource.capacity)
        .bind(resource.is_available)
        .bind(&resource.features)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, resource_id: &ID) -> Option<Resource> {
        let resource: Option<ResourceRaw> = sqlx::query_as(
            r#"
            SELECT * FROM resources AS r
            WHERE r.resource_uid = $1
            "#,
        )
        .bind(resource_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);

        resource.map(|r| r.into())
    }

    async fn find_all(&self) -> Vec<Resource> {
        let resources: Vec<ResourceRaw> = sqlx::query_as(
            r#"
            SELECT * FROM resources AS r
            ORDER BY r.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        resources.into_iter().map(|r| r.into()).collect()
    }
}
