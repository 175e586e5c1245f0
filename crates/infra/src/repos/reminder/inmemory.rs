use super::{CancelResult, IReminderRepo};
use crate::repos::shared::inmemory_repo::*;
use bookli_domain::{Reminder, ReminderStatus, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        let mut collection = self.reminders.lock().unwrap();
        for reminder in reminders {
            let exists = collection
                .iter()
                .any(|r| r.identifier() == reminder.identifier());
            if !exists {
                collection.push(reminder.clone());
            }
        }
        Ok(())
    }

    async fn claim_due(&self, before: i64) -> Vec<Reminder> {
        let mut collection = self.reminders.lock().unwrap();
        let mut claimed = Vec::new();
        for reminder in collection.iter_mut() {
            if reminder.status == ReminderStatus::Scheduled && reminder.remind_at <= before {
                reminder.status = ReminderStatus::Fired;
                claimed.push(reminder.clone());
            }
        }
        claimed.sort_by_key(|r| r.remind_at);
        claimed
    }

    async fn cancel_by_reservation(&self, reservation_id: &ID) -> anyhow::Result<CancelResult> {
        let cancelled_count = update_many(
            &self.reminders,
            |r: &Reminder| {
                r.reservation_id == *reservation_id && r.status == ReminderStatus::Scheduled
            },
            |r| r.status = ReminderStatus::Cancelled,
        );
        Ok(CancelResult { cancelled_count })
    }

    async fn find_by_reservation(&self, reservation_id: &ID) -> Vec<Reminder> {
        let mut found = find_by(&self.reminders, |r: &Reminder| {
            r.reservation_id == *reservation_id
        });
        found.sort_by_key(|r| r.remind_at);
        found
    }
}
