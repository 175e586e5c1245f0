mod reminder;
mod reservation;
mod resource;
mod shared;

use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use reservation::{InMemoryReservationRepo, PostgresReservationRepo};
use resource::{InMemoryResourceRepo, PostgresResourceRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::{Arc, Mutex};

pub use reminder::{CancelResult, IReminderRepo};
pub use reservation::{IReservationRepo, ReservationInsert};
pub use resource::IResourceRepo;

#[derive(Clone)]
pub struct Repos {
    pub resources: Arc<dyn IResourceRepo>,
    pub reservations: Arc<dyn IReservationRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;

        Ok(Self {
            resources: Arc::new(PostgresResourceRepo::new(pool.clone())),
            reservations: Arc::new(PostgresReservationRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        // The reservation repo flips the denormalized availability flag
        // inside its own lock, so it shares the resource store with the
        // resource repo.
        let resource_store = Arc::new(Mutex::new(Vec::new()));

        Self {
            resources: Arc::new(InMemoryResourceRepo::new(resource_store.clone())),
            reservations: Arc::new(InMemoryReservationRepo::new(resource_store)),
            reminders: Arc::new(InMemoryReminderRepo::new()),
        }
    }
}
