mod inmemory;
mod postgres;

pub use inmemory::InMemoryResourceRepo;
use bookli_domain::{Resource, ID};
pub use postgres::PostgresResourceRepo;

#[async_trait::async_trait]
pub trait IResourceRepo: Send + Sync {
    async fn insert(&self, resource: &Resource) -> anyhow::Result<()>;
    async fn save(&self, resource: &Resource) -> anyhow::Result<()>;
    async fn find(&self, resource_id: &ID) -> Option<Resource>;
    async fn find_all(&self) -> Vec<Resource>;
}

#[cfg(test)]
mod tests {
    use crate::repos::Repos;
    use bookli_domain::{Resource, ResourceType};

    #[tokio::test]
    async fn test_resource_repo() {
        let repos = Repos::create_inmemory();

        let mut resource = Resource::new("Desk 12", ResourceType::Desk, 1);
        resource.features = vec!["standing".into(), "dual_monitor".into()];
        repos
            .resources
            .insert(&resource)
            .await
            .expect("To insert resource");

        let found = repos
            .resources
            .find(&resource.id)
            .await
            .expect("To find resource");
        assert_eq!(found.name, "Desk 12");
        assert_eq!(found.features.len(), 2);
        assert!(found.is_available);

        let mut updated = found;
        updated.is_available = false;
        repos
            .resources
            .save(&updated)
            .await
            .expect("To save resource");
        let found = repos.resources.find(&resource.id).await.unwrap();
        assert!(!found.is_available);

        assert_eq!(repos.resources.find_all().await.len(), 1);
    }
}
