use super::{IReservationRepo, ReservationInsert};
use bookli_domain::{Reservation, ReservationStatus, TimeSpan, ID};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use std::str::FromStr;

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReservationRaw {
    reservation_uid: Uuid,
    resource_uid: Uuid,
    requester_uid: Uuid,
    start_ts: i64,
    end_ts: i64,
    status: String,
    attendees: Vec<String>,
    note: Option<String>,
    created: i64,
}

impl Into<Reservation> for ReservationRaw {
    fn into(self) -> Reservation {
        Reservation {
            id: self.reservation_uid.into(),
            resource_id: self.resource_uid.into(),
            requester_id: self.requester_uid.into(),
            time: TimeSpan::new(self.start_ts, self.end_ts)
                .expect("Stored reservation timespan to be valid"),
            status: ReservationStatus::from_str(&self.status)
                .expect("Stored reservation status to be valid"),
            attendees: self.attendees,
            note: self.note,
            created: self.created,
        }
    }
}

const OVERLAP_QUERY: &str = r#"
    SELECT * FROM reservations AS r
    WHERE r.resource_uid = $1 AND
    r.status != 'cancelled' AND
    r.start_ts < $2 AND r.end_ts > $3 AND
    ($4::uuid IS NULL OR r.reservation_uid != $4)
    ORDER BY r.start_ts
"#;

#[async_trait::async_trait]
impl IReservationRepo for PostgresReservationRepo {
    async fn insert_if_vacant(
        &self,
        reservation: &Reservation,
    ) -> anyhow::Result<ReservationInsert> {
        let mut tx = self.pool.begin().await?;

        // Resource-scoped lock held until commit, serializing
        // check-and-insert for concurrent writers on this resource.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(reservation.resource_id.to_string())
            .execute(&mut tx)
            .await?;

        let conflicts: Vec<ReservationRaw> = sqlx::query_as(OVERLAP_QUERY)
            .bind(reservation.resource_id.inner_ref())
            .bind(reservation.time.end())
            .bind(reservation.time.start())
            .bind(None::<Uuid>)
            .fetch_all(&mut tx)
            .await?;
        if !conflicts.is_empty() {
            tx.rollback().await?;
            return Ok(ReservationInsert::Conflict(
                conflicts.into_iter().map(|r| r.into()).collect(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO reservations
            (reservation_uid, resource_uid, requester_uid, start_ts, end_ts, status, attendees, note, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reservation.id.inner_ref())
        .bind(reservation.resource_id.inner_ref())
        .bind(reservation.requester_id.inner_ref())
        .bind(reservation.time.start())
        .bind(reservation.time.end())
        .bind(reservation.status.to_string())
        .bind(&reservation.attendees)
        .bind(&reservation.note)
        .bind(reservation.created)
        .execute(&mut tx)
        .await?;

        // The availability flag is a projection of the reservation set
        // and is refreshed inside the same transaction.
        sqlx::query("UPDATE resources SET is_available = false WHERE resource_uid = $1")
            .bind(reservation.resource_id.inner_ref())
            .execute(&mut tx)
            .await?;

        tx.commit().await?;
        Ok(ReservationInsert::Inserted)
    }

    async fn cancel(&self, reservation_id: &ID) -> anyhow::Result<Option<Reservation>> {
        let mut tx = self.pool.begin().await?;

        let reservation: Option<ReservationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reservations AS r
            WHERE r.reservation_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(reservation_id.inner_ref())
        .fetch_optional(&mut tx)
        .await?;
        let mut reservation = match reservation {
            Some(r) => r,
            None => return Ok(None),
        };

        if reservation.status != ReservationStatus::Cancelled.to_string() {
            sqlx::query("UPDATE reservations SET status = 'cancelled' WHERE reservation_uid = $1")
                .bind(reservation_id.inner_ref())
                .execute(&mut tx)
                .await?;
            reservation.status = ReservationStatus::Cancelled.to_string();

            sqlx::query(
                r#"
                UPDATE resources SET is_available = NOT EXISTS (
                    SELECT 1 FROM reservations
                    WHERE resource_uid = $1 AND status != 'cancelled'
                )
                WHERE resource_uid = $1
                "#,
            )
            .bind(reservation.resource_uid)
            .execute(&mut tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(reservation.into()))
    }

    async fn find(&self, reservation_id: &ID) -> Option<Reservation> {
        let reservation: Option<ReservationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reservations AS r
            WHERE r.reservation_uid = $1
            "#,
        )
        .bind(reservation_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);

        reservation.map(|r| r.into())
    }

    async fn find_overlapping(
        &self,
        resource_id: &ID,
        span: &TimeSpan,
        exclude: Option<&ID>,
    ) -> Vec<Reservation> {
        let reservations: Vec<ReservationRaw> = sqlx::query_as(OVERLAP_QUERY)
            .bind(resource_id.inner_ref())
            .bind(span.end())
            .bind(span.start())
            .bind(exclude.map(|id| *id.inner_ref()))
            .fetch_all(&self.pool)
            .await
            .unwrap_or_default();

        reservations.into_iter().map(|r| r.into()).collect()
    }

    async fn find_by_requester(&self, requester_id: &ID) -> Vec<Reservation> {
        let reservations: Vec<ReservationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reservations AS r
            WHERE r.requester_uid = $1
            ORDER BY r.start_ts
            "#,
        )
        .bind(requester_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        reservations.into_iter().map(|r| r.into()).collect()
    }
}
