use crate::reminder::ReminderKind;
use crate::reservation::Reservation;
use crate::resource::Resource;
use std::collections::HashMap;

/// An outbound notification handed to the dispatcher: who to reach,
/// what to say and the template/context pair to render it from. Not
/// persisted, its delivery attempts only exist in logs.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipients: Vec<String>,
    pub subject: String,
    pub template: String,
    pub context: HashMap<String, String>,
}

fn reservation_context(reservation: &Reservation, resource: &Resource) -> HashMap<String, String> {
    let mut context = HashMap::new();
    context.insert("reservation_id".into(), reservation.id.to_string());
    context.insert("resource_name".into(), resource.name.clone());
    context.insert(
        "resource_type".into(),
        resource.resource_type.to_string(),
    );
    context.insert("start_ts".into(), reservation.time.start().to_string());
    context.insert("end_ts".into(), reservation.time.end().to_string());
    context
}

impl Notification {
    pub fn reservation_confirmed(reservation: &Reservation, resource: &Resource) -> Self {
        Self {
            recipients: reservation.attendees.clone(),
            subject: format!("Your booking of {} is confirmed", resource.name),
            template: "reservation_confirmed".into(),
            context: reservation_context(reservation, resource),
        }
    }

    pub fn reservation_cancelled(reservation: &Reservation, resource: &Resource) -> Self {
        Self {
            recipients: reservation.attendees.clone(),
            subject: format!("Your booking of {} was cancelled", resource.name),
            template: "reservation_cancelled".into(),
            context: reservation_context(reservation, resource),
        }
    }

    pub fn reservation_reminder(
        reservation: &Reservation,
        resource: &Resource,
        kind: ReminderKind,
    ) -> Self {
        let mut context = reservation_context(reservation, resource);
        context.insert("reminder_kind".into(), kind.to_string());
        Self {
            recipients: reservation.attendees.clone(),
            subject: format!("Reminder: upcoming booking of {}", resource.name),
            template: "reservation_reminder".into(),
            context,
        }
    }
}
