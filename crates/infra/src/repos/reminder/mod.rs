mod inmemory;
mod postgres;

use bookli_domain::{Reminder, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[derive(Debug)]
pub struct CancelResult {
    pub cancelled_count: i64,
}

/// The durable, time-ordered reminder job table polled by the
/// scheduler loop. Jobs transition scheduled -> fired / cancelled and
/// are never deleted, so the history survives restarts.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Inserts jobs, skipping any whose `(reservation, kind)`
    /// identifier already exists. Scheduling is idempotent.
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    /// Atomically claims every scheduled job due at or before
    /// `before`, marking it fired. A job is claimed by exactly one
    /// caller; a cancel arriving after the claim does not suppress it.
    async fn claim_due(&self, before: i64) -> Vec<Reminder>;
    /// Voids all still-scheduled jobs of a reservation. Fired jobs are
    /// left as-is.
    async fn cancel_by_reservation(&self, reservation_id: &ID) -> anyhow::Result<CancelResult>;
    async fn find_by_reservation(&self, reservation_id: &ID) -> Vec<Reminder>;
}

#[cfg(test)]
mod tests {
    use crate::repos::Repos;
    use bookli_domain::{
        reminders_for_reservation, Reminder, ReminderStatus, Reservation, ReservationStatus,
        TimeSpan,
    };

    const HOUR: i64 = 1000 * 60 * 60;

    fn reminders(start_ts: i64) -> (Reservation, Vec<Reminder>) {
        let reservation = Reservation {
            id: Default::default(),
            resource_id: Default::default(),
            requester_id: Default::default(),
            time: TimeSpan::new(start_ts, start_ts + HOUR).unwrap(),
            status: ReservationStatus::Confirmed,
            attendees: Vec::new(),
            note: None,
            created: 0,
        };
        let jobs = reminders_for_reservation(&reservation, 0);
        (reservation, jobs)
    }

    #[tokio::test]
    async fn test_claim_due_fires_each_job_once() {
        let repos = Repos::create_inmemory();
        let (_, jobs) = reminders(25 * HOUR);
        assert_eq!(jobs.len(), 2);
        repos
            .reminders
            .bulk_insert(&jobs)
            .await
            .expect("To insert reminders");

        // Only the day-before job (fire-time 1h) is due in two hours
        let claimed = repos.reminders.claim_due(2 * HOUR).await;
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].status, ReminderStatus::Fired);
        assert_eq!(claimed[0].remind_at, HOUR);

        // A second poll over the same window claims nothing
        assert!(repos.reminders.claim_due(2 * HOUR).await.is_empty());

        let claimed = repos.reminders.claim_due(25 * HOUR).await;
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].remind_at, 24 * HOUR);
    }

    #[tokio::test]
    async fn test_bulk_insert_is_idempotent_per_identifier() {
        let repos = Repos::create_inmemory();
        let (reservation, jobs) = reminders(25 * HOUR);
        repos.reminders.bulk_insert(&jobs).await.unwrap();
        repos.reminders.bulk_insert(&jobs).await.unwrap();

        assert_eq!(
            repos
                .reminders
                .find_by_reservation(&reservation.id)
                .await
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_cancel_voids_only_scheduled_jobs() {
        let repos = Repos::create_inmemory();
        let (reservation, jobs) = reminders(25 * HOUR);
        repos.reminders.bulk_insert(&jobs).await.unwrap();

        // Fire the first job, then void the rest
        assert_eq!(repos.reminders.claim_due(2 * HOUR).await.len(), 1);
        let result = repos
            .reminders
            .cancel_by_reservation(&reservation.id)
            .await
            .unwrap();
        assert_eq!(result.cancelled_count, 1);

        let jobs = repos.reminders.find_by_reservation(&reservation.id).await;
        assert!(jobs.iter().any(|j| j.status == ReminderStatus::Fired));
        assert!(jobs.iter().any(|j| j.status == ReminderStatus::Cancelled));

        // Nothing left to fire or to cancel
        assert!(repos.reminders.claim_due(25 * HOUR).await.is_empty());
        let result = repos
            .reminders
            .cancel_by_reservation(&reservation.id)
            .await
            .unwrap();
        assert_eq!(result.cancelled_count, 0);
    }
}
