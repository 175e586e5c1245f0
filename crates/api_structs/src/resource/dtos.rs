use bookli_domain::{Resource, ResourceType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDTO {
    pub id: ID,
    pub name: String,
    pub resource_type: ResourceType,
    pub capacity: i64,
    pub is_available: bool,
    pub features: Vec<String>,
}

impl ResourceDTO {
    pub fn new(resource: Resource) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.name,
            resource_type: resource.resource_type,
            capacity: resource.capacity,
            is_available: resource.is_available,
            features: resource.features,
        }
    }
}
