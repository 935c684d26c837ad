//! Reservation API

use shared::models::{
    Availability, AvailabilityQuery, Reservation, ReservationAction, ReservationCreate,
    ReservationQuery,
};
use shared::query::with_query;
use shared::{Paginated, ValidationError};

use super::{delete_resource, invalidate};
use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::{QueryKey, QueryOptions, keys};

service!(
    /// Reservation API (`/reservations`)
    ReservationService
);

impl<C: HttpClient> ReservationService<C> {
    pub async fn list(&self, query: &ReservationQuery) -> ClientResult<Paginated<Reservation>> {
        let qs = query.to_query_string();
        let path = with_query("/reservations", &qs);
        let key = keys::list(keys::RESERVATIONS, &qs);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Paginated<Reservation>>(&path))
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Reservation> {
        let path = format!("/reservations/{id}");
        let key = keys::detail(keys::RESERVATIONS, id);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Reservation>(&path))
            .await
    }

    /// Book a table; the date must not lie before `today`
    pub async fn create(&self, data: &ReservationCreate) -> ClientResult<Reservation> {
        data.validate_on(shared::util::today())?;
        let reservation: Reservation = self.ctx.http.post("/reservations", data).await?;
        invalidate(&self.ctx, &[keys::RESERVATIONS, keys::ANALYTICS, keys::CART]);
        tracing::info!(
            reservation_id = reservation.id,
            date = %reservation.date,
            party_size = reservation.party_size,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Ask the backend which tables fit a slot. Always fetched fresh.
    pub async fn check_availability(&self, query: &AvailabilityQuery) -> ClientResult<Availability> {
        if query.party_size == 0 {
            return Err(ValidationError::new("partySize", "party size must be at least 1").into());
        }
        let qs = query.to_query_string();
        let path = with_query("/reservations/availability", &qs);
        let key = QueryKey::new(keys::RESERVATIONS)
            .with("availability")
            .with(&qs);
        self.ctx
            .cache
            .fetch_with(&key, QueryOptions::always_refetch(), || {
                self.ctx.http.get::<Availability>(&path)
            })
            .await
    }

    /// Move a reservation along its lifecycle.
    ///
    /// Actions the current status does not offer are refused without a
    /// request; the backend stays the authority on the transition.
    pub async fn transition(
        &self,
        reservation: &Reservation,
        action: ReservationAction,
    ) -> ClientResult<Reservation> {
        if !reservation.status.allows(action) {
            return Err(ValidationError::new(
                "status",
                format!("cannot {action} a {} reservation", reservation.status),
            )
            .into());
        }

        let id = reservation.id;
        let updated: Reservation = self
            .ctx
            .http
            .patch_empty(&format!("/reservations/{id}/{}", action.path_segment()))
            .await?;
        invalidate(&self.ctx, &[keys::RESERVATIONS, keys::ANALYTICS]);
        self.ctx
            .cache
            .set(&keys::detail(keys::RESERVATIONS, id), &updated)?;
        tracing::info!(
            reservation_id = id,
            from = %reservation.status,
            to = %updated.status,
            "Reservation status changed"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        delete_resource(&self.ctx.http, &format!("/reservations/{id}")).await?;
        self.ctx.cache.remove(&keys::detail(keys::RESERVATIONS, id));
        invalidate(&self.ctx, &[keys::RESERVATIONS, keys::ANALYTICS]);
        tracing::info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }
}
