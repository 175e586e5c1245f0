use crate::reservation::get_due_reminders::GetDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until};
use bookli_domain::{Notification, Reminder, ReservationStatus};
use bookli_infra::BookliContext;
use std::time::Duration;
use tracing::info;

const REMINDERS_POLL_INTERVAL: i64 = 1000 * 60;

/// Spawns the background loop that polls the reminder job table once a
/// minute and hands due jobs to the notification dispatcher. Runs
/// independently of request handling.
pub fn start_send_reminders_job(ctx: BookliContext) {
    actix_web::rt::spawn(async move {
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_due_reminders(context));
        }
    });
}

async fn send_due_reminders(ctx: BookliContext) {
    let usecase = GetDueRemindersUseCase {
        reminders_interval: REMINDERS_POLL_INTERVAL,
    };
    let (due, send_instant) = match execute(usecase, &ctx).await {
        Ok(res) => res,
        Err(_) => return,
    };
    if due.is_empty() {
        return;
    }

    sleep_until(send_instant).await;
    deliver_due_reminders(&ctx, due).await;
}

/// Delivers claimed reminder jobs. The reservation status is re-read
/// right before delivery so that reminders of reservations cancelled
/// since scheduling are dropped, a job already claimed while the
/// cancel ran is the accepted at-most-one-extra-delivery slack.
async fn deliver_due_reminders(ctx: &BookliContext, due: Vec<Reminder>) {
    for reminder in due {
        let reservation = match ctx.repos.reservations.find(&reminder.reservation_id).await {
            Some(reservation) => reservation,
            None => continue,
        };
        if reservation.status != ReservationStatus::Confirmed {
            info!(
                "Skipping {} reminder, reservation {} is no longer confirmed",
                reminder.kind, reservation.id
            );
            continue;
        }
        let resource = match ctx.repos.resources.find(&reservation.resource_id).await {
            Some(resource) => resource,
            None => continue,
        };

        ctx.mail
            .deliver(Notification::reservation_reminder(
                &reservation,
                &resource,
                reminder.kind,
            ))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookli_domain::{
        reminders_for_reservation, Reservation, Resource, ResourceType, TimeSpan,
    };
    use bookli_infra::{setup_context, IMailRelay, MailService, RetryPolicy};
    use std::sync::{Arc, Mutex};

    const HOUR: i64 = 1000 * 60 * 60;

    struct CountingRelay {
        templates: Mutex<Vec<String>>,
    }

    impl CountingRelay {
        fn new() -> Self {
            Self {
                templates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl IMailRelay for CountingRelay {
        async fn send(
            &self,
            notification: &Notification,
            _body: &str,
        ) -> anyhow::Result<()> {
            self.templates
                .lock()
                .unwrap()
                .push(notification.template.clone());
            Ok(())
        }
    }

    async fn setup_with_relay() -> (BookliContext, Arc<CountingRelay>) {
        let mut ctx = setup_context().await;
        let relay = Arc::new(CountingRelay::new());
        ctx.mail = MailService::new(
            relay.clone(),
            Arc::new(CountingRelay::new()),
            RetryPolicy {
                attempts: 1,
                backoff: Duration::from_millis(0),
            },
        );
        (ctx, relay)
    }

    async fn insert_reservation(ctx: &BookliContext, start_ts: i64) -> Reservation {
        let resource = Resource::new("Booth 1", ResourceType::Booth, 1);
        ctx.repos.resources.insert(&resource).await.unwrap();

        let reservation = Reservation {
            id: Default::default(),
            resource_id: resource.id.clone(),
            requester_id: Default::default(),
            time: TimeSpan::new(start_ts, start_ts + HOUR).unwrap(),
            status: ReservationStatus::Confirmed,
            attendees: vec!["guest@example.com".into()],
            note: None,
            created: 0,
        };
        ctx.repos
            .reservations
            .insert_if_vacant(&reservation)
            .await
            .unwrap();
        reservation
    }

    #[actix_web::test]
    async fn delivers_reminders_of_confirmed_reservations() {
        let (ctx, relay) = setup_with_relay().await;
        let now = ctx.sys.get_timestamp_millis();
        let reservation = insert_reservation(&ctx, now + 25 * HOUR).await;
        let reminders = reminders_for_reservation(&reservation, now);

        deliver_due_reminders(&ctx, reminders).await;
        let templates = relay.templates.lock().unwrap();
        assert_eq!(templates.len(), 2);
        assert!(templates.iter().all(|t| t == "reservation_reminder"));
    }

    #[actix_web::test]
    async fn drops_reminders_of_cancelled_reservations() {
        let (ctx, relay) = setup_with_relay().await;
        let now = ctx.sys.get_timestamp_millis();
        let reservation = insert_reservation(&ctx, now + 25 * HOUR).await;
        let reminders = reminders_for_reservation(&reservation, now);

        ctx.repos.reservations.cancel(&reservation.id).await.unwrap();

        deliver_due_reminders(&ctx, reminders).await;
        assert!(relay.templates.lock().unwrap().is_empty());
    }
}
