mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailSettings};
use repos::Repos;
pub use repos::{
    CancelResult, IReminderRepo, IReservationRepo, IResourceRepo, ReservationInsert,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct BookliContext {
    pub repos: Repos,
    pub config: Config,
    pub mail: MailService,
    pub sys: Arc<dyn ISys>,
}

/// Will setup the infrastructure context given the environment.
/// Backed by postgres when `DATABASE_URL` is set, by inmemory repos
/// otherwise (local development and tests).
pub async fn setup_context() -> BookliContext {
    let repos = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => Repos::create_postgres(&connection_string)
            .await
            .expect("Postgres credentials must be set and valid"),
        Err(_) => {
            info!("DATABASE_URL not set, using inmemory repos");
            Repos::create_inmemory()
        }
    };

    let config = Config::new();
    let mail = MailService::from_settings(&config.mail);

    BookliContext {
        repos,
        config,
        mail,
        sys: Arc::new(RealSys {}),
    }
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string =
        std::env::var("DATABASE_URL").expect("DATABASE_URL env var to be present.");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
