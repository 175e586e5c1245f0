use super::{CancelResult, IReminderRepo};
use bookli_domain::{Reminder, ReminderKind, ReminderStatus, ID};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use std::str::FromStr;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    reservation_uid: Uuid,
    remind_at: i64,
    kind: String,
    status: String,
}

impl Into<Reminder> for ReminderRaw {
    fn into(self) -> Reminder {
        Reminder {
            id: self.reminder_uid.into(),
            reservation_id: self.reservation_uid.into(),
            remind_at: self.remind_at,
            kind: ReminderKind::from_str(&self.kind).expect("Stored reminder kind to be valid"),
            status: ReminderStatus::from_str(&self.status)
                .expect("Stored reminder status to be valid"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            sqlx::query(
                r#"
                INSERT INTO reminders
                (reminder_uid, reservation_uid, remind_at, kind, status, identifier)
                VALUES($1, $2, $3, $4, $5, $6)
                ON CONFLICT (identifier) DO NOTHING
                "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.reservation_id.inner_ref())
            .bind(reminder.remind_at)
            .bind(reminder.kind.to_string())
            .bind(reminder.status.to_string())
            .bind(reminder.identifier())
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn claim_due(&self, before: i64) -> Vec<Reminder> {
        let claimed: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            UPDATE reminders
            SET status = 'fired'
            WHERE status = 'scheduled' AND remind_at <= $1
            RETURNING reminder_uid, reservation_uid, remind_at, kind, status
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        let mut claimed = claimed
            .into_iter()
            .map(|r| r.into())
            .collect::<Vec<Reminder>>();
        claimed.sort_by_key(|r| r.remind_at);
        claimed
    }

    async fn cancel_by_reservation(&self, reservation_id: &ID) -> anyhow::Result<CancelResult> {
        let result = sqlx::query(
            r#"
            UPDATE reminders
            SET status = 'cancelled'
            WHERE reservation_uid = $1 AND status = 'scheduled'
            "#,
        )
        .bind(reservation_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(CancelResult {
            cancelled_count: result.rows_affected() as i64,
        })
    }

    async fn find_by_reservation(&self, reservation_id: &ID) -> Vec<Reminder> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT reminder_uid, reservation_uid, remind_at, kind, status
            FROM reminders AS r
            WHERE r.reservation_uid = $1
            ORDER BY r.remind_at
            "#,
        )
        .bind(reservation_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        reminders.into_iter().map(|r| r.into()).collect()
    }
}
