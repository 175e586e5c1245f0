mod inmemory;
mod postgres;

use bookli_domain::{Reservation, TimeSpan, ID};
pub use inmemory::InMemoryReservationRepo;
pub use postgres::PostgresReservationRepo;

/// Outcome of an atomic check-and-insert on the reservation store.
#[derive(Debug)]
pub enum ReservationInsert {
    Inserted,
    /// The active reservations that overlap the candidate's timespan
    /// on the same resource.
    Conflict(Vec<Reservation>),
}

#[async_trait::async_trait]
pub trait IReservationRepo: Send + Sync {
    /// Checks for overlapping active reservations and inserts the
    /// candidate only if there are none. Check and insert are atomic
    /// with respect to concurrent writers on the same resource, and
    /// the resource's availability flag is recomputed under the same
    /// lock.
    async fn insert_if_vacant(&self, reservation: &Reservation)
        -> anyhow::Result<ReservationInsert>;
    /// Transitions a reservation to cancelled and restores the
    /// resource's availability flag. Cancelling an already-cancelled
    /// reservation is a no-op. Returns the reservation as stored, or
    /// `None` when it does not exist.
    async fn cancel(&self, reservation_id: &ID) -> anyhow::Result<Option<Reservation>>;
    async fn find(&self, reservation_id: &ID) -> Option<Reservation>;
    /// All active reservations on the resource overlapping the span
    /// under half-open semantics, its own row excluded when updating.
    async fn find_overlapping(
        &self,
        resource_id: &ID,
        span: &TimeSpan,
        exclude: Option<&ID>,
    ) -> Vec<Reservation>;
    async fn find_by_requester(&self, requester_id: &ID) -> Vec<Reservation>;
}
