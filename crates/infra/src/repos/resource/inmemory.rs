use super::IResourceRepo;
use crate::repos::shared::inmemory_repo::*;
use bookli_domain::{Resource, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryResourceRepo {
    resources: Arc<Mutex<Vec<Resource>>>,
}

impl InMemoryResourceRepo {
    pub fn new(resources: Arc<Mutex<Vec<Resource>>>) -> Self {
        Self { resources }
    }
}

#[async_trait::async_trait]
impl IResourceRepo for InMemoryResourceRepo {
    async fn insert(&self, resource: &Resource) -> anyhow::Result<()> {
        insert(resource, &self.resources);
        Ok(())
    }

    async fn save(&self, resource: &Resource) -> anyhow::Result<()> {
        save(resource, &self.resources);
        Ok(())
    }

    async fn find(&self, resource_id: &ID) -> Option<Resource> {
        find(resource_id, &self.resources)
    }

    async fn find_all(&self) -> Vec<Resource> {
        find_by(&self.resources, |_| true)
    }
}
