use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Desk,
    MeetingRoom,
    Booth,
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let t = match self {
            Self::Desk => "desk",
            Self::MeetingRoom => "meeting_room",
            Self::Booth => "booth",
        };
        write!(f, "{}", t)
    }
}

impl std::str::FromStr for ResourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desk" => Ok(Self::Desk),
            "meeting_room" => Ok(Self::MeetingRoom),
            "booth" => Ok(Self::Booth),
            _ => Err(anyhow::Error::msg(format!("Unknown resource type: {}", s))),
        }
    }
}

/// A bookable physical unit (desk, meeting room, booth).
///
/// `is_available` is a denormalized view of whether any active
/// `Reservation` currently claims the resource. It is recomputed by the
/// reservation lifecycle under the same lock as the reservation write and
/// must never be set independently.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: ID,
    pub name: String,
    pub resource_type: ResourceType,
    pub capacity: i64,
    pub is_available: bool,
    pub features: Vec<String>,
}

impl Resource {
    pub fn new(name: &str, resource_type: ResourceType, capacity: i64) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            resource_type,
            capacity,
            is_available: true,
            features: Vec::new(),
        }
    }
}

impl Entity for Resource {
    fn id(&self) -> &ID {
        &self.id
    }
}
