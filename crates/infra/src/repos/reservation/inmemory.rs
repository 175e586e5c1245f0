use super::{IReservationRepo, ReservationInsert};
use crate::repos::shared::inmemory_repo::*;
use bookli_domain::{Reservation, ReservationStatus, Resource, TimeSpan, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryReservationRepo {
    reservations: Mutex<Vec<Reservation>>,
    resources: Arc<Mutex<Vec<Resource>>>,
}

impl InMemoryReservationRepo {
    pub fn new(resources: Arc<Mutex<Vec<Resource>>>) -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
            resources,
        }
    }

    /// Recomputes the denormalized availability flag from the current
    /// reservation set. Callers hold the reservation lock, which is
    /// what serializes writers in this repo.
    fn refresh_resource_availability(
        &self,
        resource_id: &ID,
        reservations: &[Reservation],
    ) {
        let any_active = reservations
            .iter()
            .any(|r| r.resource_id == *resource_id && r.is_active());
        let mut resources = self.resources.lock().unwrap();
        for resource in resources.iter_mut() {
            if resource.id == *resource_id {
                resource.is_available = !any_active;
            }
        }
    }
}

fn overlapping<'a>(
    reservations: &'a [Reservation],
    resource_id: &ID,
    span: &TimeSpan,
    exclude: Option<&ID>,
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| {
            r.resource_id == *resource_id
                && r.is_active()
                && r.time.overlaps(span)
                && exclude.map(|id| r.id != *id).unwrap_or(true)
        })
        .collect()
}

#[async_trait::async_trait]
impl IReservationRepo for InMemoryReservationRepo {
    async fn insert_if_vacant(
        &self,
        reservation: &Reservation,
    ) -> anyhow::Result<ReservationInsert> {
        // One guard over check + insert, concurrent writers on the
        // same resource cannot both observe "no conflict".
        let mut reservations = self.reservations.lock().unwrap();

        let conflicts = overlapping(
            &reservations,
            &reservation.resource_id,
            &reservation.time,
            None,
        )
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
        if !conflicts.is_empty() {
            return Ok(ReservationInsert::Conflict(conflicts));
        }

        reservations.push(reservation.clone());
        self.refresh_resource_availability(&reservation.resource_id, &reservations);
        Ok(ReservationInsert::Inserted)
    }

    async fn cancel(&self, reservation_id: &ID) -> anyhow::Result<Option<Reservation>> {
        let mut reservations = self.reservations.lock().unwrap();

        let reservation = match reservations.iter_mut().find(|r| r.id == *reservation_id) {
            Some(r) => r,
            None => return Ok(None),
        };
        if reservation.status != ReservationStatus::Cancelled {
            reservation.status = ReservationStatus::Cancelled;
        }
        let cancelled = reservation.clone();

        self.refresh_resource_availability(&cancelled.resource_id, &reservations);
        Ok(Some(cancelled))
    }

    async fn find(&self, reservation_id: &ID) -> Option<Reservation> {
        find(reservation_id, &self.reservations)
    }

    async fn find_overlapping(
        &self,
        resource_id: &ID,
        span: &TimeSpan,
        exclude: Option<&ID>,
    ) -> Vec<Reservation> {
        let reservations = self.reservations.lock().unwrap();
        let mut found = overlapping(&reservations, resource_id, span, exclude)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by_key(|r| r.time.start());
        found
    }

    async fn find_by_requester(&self, requester_id: &ID) -> Vec<Reservation> {
        let mut found = find_by(&self.reservations, |r: &Reservation| {
            r.requester_id == *requester_id
        });
        found.sort_by_key(|r| r.time.start());
        found
    }
}
