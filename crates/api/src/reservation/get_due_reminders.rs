use crate::shared::usecase::UseCase;
use actix_web::rt::time::Instant;
use bookli_domain::Reminder;
use bookli_infra::BookliContext;
use std::time::Duration;
use tracing::error;

/// Claims the reminder jobs coming due within the next poll interval.
/// Claimed jobs are marked fired in the job table, so a concurrently
/// running cancel can no longer void them (at-most-one-extra-delivery).
#[derive(Debug)]
pub struct GetDueRemindersUseCase {
    /// Will claim reminders due within this interval
    pub reminders_interval: i64,
}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDueRemindersUseCase {
    type Response = (Vec<Reminder>, Instant);

    type Errors = UseCaseErrors;

    /// This will run every minute
    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let ts = ctx.sys.get_timestamp_millis() + self.reminders_interval;

        let reminders = ctx.repos.reminders.claim_due(ts).await;

        // The claim window ends in the future, deliveries are delayed
        // until the jobs are actually due.
        let millis_to_send = ts - ctx.sys.get_timestamp_millis();
        let instant = if millis_to_send > 0 {
            Instant::now() + Duration::from_millis(millis_to_send as u64)
        } else {
            error!("Important: Increase computation time for get due reminders usecase");
            Instant::now()
        };
        Ok((reminders, instant))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use bookli_domain::{
        reminders_for_reservation, Reminder, ReminderStatus, Reservation, ReservationStatus,
        Resource, ResourceType, TimeSpan,
    };
    use bookli_infra::{setup_context, ISys};
    use std::sync::Arc;

    const HOUR: i64 = 1000 * 60 * 60;
    const MINUTE: i64 = 1000 * 60;

    struct StaticTimeSys {
        now: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    async fn setup(now: i64) -> BookliContext {
        let mut ctx = setup_context().await;
        ctx.sys = Arc::new(StaticTimeSys { now });
        ctx
    }

    async fn insert_reservation_with_reminders(
        ctx: &BookliContext,
        start_ts: i64,
    ) -> (Reservation, Vec<Reminder>) {
        let resource = Resource::new("Room-B", ResourceType::MeetingRoom, 4);
        ctx.repos.resources.insert(&resource).await.unwrap();

        let reservation = Reservation {
            id: Default::default(),
            resource_id: resource.id.clone(),
            requester_id: Default::default(),
            time: TimeSpan::new(start_ts, start_ts + HOUR).unwrap(),
            status: ReservationStatus::Confirmed,
            attendees: vec!["guest@example.com".into()],
            note: None,
            created: ctx.sys.get_timestamp_millis(),
        };
        ctx.repos
            .reservations
            .insert_if_vacant(&reservation)
            .await
            .unwrap();

        let reminders =
            reminders_for_reservation(&reservation, ctx.sys.get_timestamp_millis());
        ctx.repos.reminders.bulk_insert(&reminders).await.unwrap();
        (reservation, reminders)
    }

    #[actix_web::test]
    async fn claims_only_jobs_due_within_the_interval() {
        let now = 1000 * HOUR;
        let ctx = setup(now).await;

        // Starts in one hour and thirty seconds: the hour-before
        // reminder fires within the next minute.
        insert_reservation_with_reminders(&ctx, now + HOUR + 30 * 1000).await;

        let usecase = GetDueRemindersUseCase {
            reminders_interval: MINUTE,
        };
        let (due, _) = execute(usecase, &ctx).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].status, ReminderStatus::Fired);

        // Claiming again yields nothing
        let usecase = GetDueRemindersUseCase {
            reminders_interval: MINUTE,
        };
        let (due, _) = execute(usecase, &ctx).await.unwrap();
        assert!(due.is_empty());
    }

    #[actix_web::test]
    async fn leaves_future_jobs_scheduled() {
        let now = 1000 * HOUR;
        let ctx = setup(now).await;

        let (reservation, _) =
            insert_reservation_with_reminders(&ctx, now + 25 * HOUR).await;

        let usecase = GetDueRemindersUseCase {
            reminders_interval: MINUTE,
        };
        let (due, _) = execute(usecase, &ctx).await.unwrap();
        assert!(due.is_empty());

        let jobs = ctx
            .repos
            .reminders
            .find_by_reservation(&reservation.id)
            .await;
        assert!(jobs.iter().all(|j| j.status == ReminderStatus::Scheduled));
    }
}
