use super::cancel_reservation::CancelReservationUseCase;
use super::create_reservation::CreateReservationUseCase;
use crate::shared::usecase::Subscriber;
use bookli_domain::{reminders_for_reservation, Notification, Reservation};
use bookli_infra::BookliContext;
use tracing::error;

pub struct ScheduleRemindersOnReservationCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReservationUseCase> for ScheduleRemindersOnReservationCreated {
    async fn notify(&self, reservation: &Reservation, ctx: &BookliContext) {
        let now = ctx.sys.get_timestamp_millis();
        let reminders = reminders_for_reservation(reservation, now);
        if reminders.is_empty() {
            return;
        }

        // Sideeffect, only log failures
        if let Err(e) = ctx.repos.reminders.bulk_insert(&reminders).await {
            error!(
                "Unable to schedule reminders for reservation {}: {:?}",
                reservation.id, e
            );
        }
    }
}

pub struct SendConfirmationOnReservationCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReservationUseCase> for SendConfirmationOnReservationCreated {
    async fn notify(&self, reservation: &Reservation, ctx: &BookliContext) {
        let resource = match ctx.repos.resources.find(&reservation.resource_id).await {
            Some(resource) => resource,
            None => return,
        };

        // Delivery retries must not hold up the reservation response
        let mail = ctx.mail.clone();
        let notification = Notification::reservation_confirmed(reservation, &resource);
        actix_web::rt::spawn(async move { mail.deliver(notification).await });
    }
}

pub struct VoidRemindersOnReservationCancelled;

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelReservationUseCase> for VoidRemindersOnReservationCancelled {
    async fn notify(
        &self,
        res: &super::cancel_reservation::UseCaseRes,
        ctx: &BookliContext,
    ) {
        if res.already_cancelled {
            return;
        }

        // Sideeffect, only log failures
        if let Err(e) = ctx
            .repos
            .reminders
            .cancel_by_reservation(&res.reservation.id)
            .await
        {
            error!(
                "Unable to void reminders for reservation {}: {:?}",
                res.reservation.id, e
            );
        }
    }
}

pub struct SendCancellationOnReservationCancelled;

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelReservationUseCase> for SendCancellationOnReservationCancelled {
    async fn notify(
        &self,
        res: &super::cancel_reservation::UseCaseRes,
        ctx: &BookliContext,
    ) {
        if res.already_cancelled {
            return;
        }
        let resource = match ctx.repos.resources.find(&res.reservation.resource_id).await {
            Some(resource) => resource,
            None => return,
        };

        let mail = ctx.mail.clone();
        let notification = Notification::reservation_cancelled(&res.reservation, &resource);
        actix_web::rt::spawn(async move { mail.deliver(notification).await });
    }
}
